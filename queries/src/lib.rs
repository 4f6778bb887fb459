use entities::{Album, Band, Genre, NewBand};
use log::{debug, info};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;

/// Optional filters for [`list_bands`]. Filters AND-compose; a default
/// filter returns every band.
#[derive(Clone, Debug, Default)]
pub struct BandFilter {
    pub genre: Option<Genre>,
    pub name_contains: Option<String>,
    pub has_albums: Option<bool>,
}

/// Creates the database file if it does not exist, opens the pool and makes
/// sure the schema is in place.
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url).await?;
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

/// Idempotent schema setup: creates the band and album tables when missing,
/// never drops or alters existing ones.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        create table if not exists band (
            id integer primary key autoincrement,
            name text not null,
            genre text not null
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        create table if not exists album (
            id integer primary key autoincrement,
            title text not null,
            release_date text not null,
            band_id integer not null references band (id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    info!("Database schema ready");
    Ok(())
}

/// Returns bands in storage order, narrowed by whatever filters are set.
pub async fn list_bands(
    pool: &SqlitePool,
    filter: &BandFilter,
) -> Result<Vec<Band>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new("select id, name, genre from band");
    let mut prefix = " where ";
    if let Some(genre) = filter.genre {
        query.push(prefix).push("genre = ").push_bind(genre.as_str());
        prefix = " and ";
    }
    if let Some(needle) = &filter.name_contains {
        query
            .push(prefix)
            .push("lower(name) like '%' || lower(")
            .push_bind(needle.clone())
            .push(") || '%'");
        prefix = " and ";
    }
    if filter.has_albums == Some(true) {
        query
            .push(prefix)
            .push("exists (select 1 from album where album.band_id = band.id)");
    }
    query.push(" order by id");
    query.build_query_as::<Band>().fetch_all(pool).await
}

pub async fn get_band(pool: &SqlitePool, band_id: i64) -> Result<Option<Band>, sqlx::Error> {
    sqlx::query_as::<_, Band>("select id, name, genre from band where id = ?")
        .bind(band_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_albums_for_band(
    pool: &SqlitePool,
    band_id: i64,
) -> Result<Vec<Album>, sqlx::Error> {
    sqlx::query_as::<_, Album>(
        "select id, title, release_date, band_id from album where band_id = ? order by id",
    )
    .bind(band_id)
    .fetch_all(pool)
    .await
}

/// Fetches the albums of several bands in one round trip, for nesting into
/// list responses.
pub async fn get_albums_for_bands(
    pool: &SqlitePool,
    band_ids: &[i64],
) -> Result<Vec<Album>, sqlx::Error> {
    if band_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query = QueryBuilder::<Sqlite>::new(
        "select id, title, release_date, band_id from album where band_id in (",
    );
    let mut separated = query.separated(", ");
    for id in band_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") order by id");
    query.build_query_as::<Album>().fetch_all(pool).await
}

/// Inserts a band and its nested albums as one transaction. The band id is
/// assigned by storage and stamped onto every album. The transaction rolls
/// back on drop, so a failed insert persists nothing.
pub async fn create_band(
    pool: &SqlitePool,
    new_band: &NewBand,
) -> Result<(Band, Vec<Album>), sqlx::Error> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("insert into band (name, genre) values (?, ?)")
        .bind(&new_band.name)
        .bind(new_band.genre.as_str())
        .execute(&mut *tx)
        .await?;
    let band_id = result.last_insert_rowid();

    let mut albums = Vec::with_capacity(new_band.albums.len());
    for album in &new_band.albums {
        let result =
            sqlx::query("insert into album (title, release_date, band_id) values (?, ?, ?)")
                .bind(&album.title)
                .bind(album.release_date)
                .bind(band_id)
                .execute(&mut *tx)
                .await?;
        albums.push(Album {
            id: result.last_insert_rowid(),
            title: album.title.clone(),
            release_date: album.release_date,
            band_id,
        });
    }
    tx.commit().await?;
    debug!(
        "Created band {} with id {} and {} albums",
        new_band.name,
        band_id,
        albums.len()
    );

    let band = Band {
        id: band_id,
        name: new_band.name.clone(),
        genre: new_band.genre,
    };
    Ok((band, albums))
}

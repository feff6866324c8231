use async_trait::async_trait;
use resource_actor::mock::MockClient;
use resource_actor::{FrameworkError, PersistentEntity, ResourceActor, Store};
use sqlx::{Row, SqliteConnection};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Tag {
    id: i64,
    label: String,
    pinned: bool,
}

#[derive(Debug)]
struct TagCreate {
    label: String,
}

#[derive(Debug)]
struct TagUpdate {
    label: String,
}

#[derive(Debug)]
enum TagAction {
    Pin(i64),
    Count,
}

#[derive(Debug, thiserror::Error)]
enum TagError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

async fn ensure_table(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tags (id INTEGER PRIMARY KEY AUTOINCREMENT, \
         label TEXT NOT NULL, pinned INTEGER NOT NULL DEFAULT 0)",
    )
    .execute(conn)
    .await
    .map(|_| ())
}

fn to_tag(row: sqlx::sqlite::SqliteRow) -> Result<Tag, sqlx::Error> {
    Ok(Tag {
        id: row.try_get("id")?,
        label: row.try_get("label")?,
        pinned: row.try_get("pinned")?,
    })
}

#[async_trait]
impl PersistentEntity for Tag {
    type Id = i64;
    type Create = TagCreate;
    type Update = TagUpdate;
    type Filter = ();
    type Action = TagAction;
    type ActionResult = i64;
    type Context = ();
    type Error = TagError;

    async fn insert(
        conn: &mut SqliteConnection,
        params: TagCreate,
        _: &(),
    ) -> Result<i64, TagError> {
        if params.label.trim().is_empty() {
            return Err(TagError::EmptyLabel);
        }
        ensure_table(&mut *conn).await?;
        let done = sqlx::query("INSERT INTO tags (label) VALUES (?)")
            .bind(params.label)
            .execute(&mut *conn)
            .await?;
        Ok(done.last_insert_rowid())
    }

    async fn fetch(conn: &mut SqliteConnection, id: &i64) -> Result<Option<Tag>, TagError> {
        ensure_table(&mut *conn).await?;
        let row = sqlx::query("SELECT id, label, pinned FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(to_tag).transpose()?)
    }

    async fn list(conn: &mut SqliteConnection, _: ()) -> Result<Vec<Tag>, TagError> {
        ensure_table(&mut *conn).await?;
        let rows = sqlx::query("SELECT id, label, pinned FROM tags ORDER BY label")
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(to_tag).collect::<Result<_, _>>()?)
    }

    async fn update(
        conn: &mut SqliteConnection,
        id: &i64,
        update: TagUpdate,
        _: &(),
    ) -> Result<Option<Tag>, TagError> {
        ensure_table(&mut *conn).await?;
        let done = sqlx::query("UPDATE tags SET label = ? WHERE id = ?")
            .bind(update.label)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if done.rows_affected() == 0 {
            return Ok(None);
        }
        Self::fetch(conn, id).await
    }

    async fn delete(conn: &mut SqliteConnection, id: &i64, _: &()) -> Result<bool, TagError> {
        ensure_table(&mut *conn).await?;
        let done = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn handle_action(
        conn: &mut SqliteConnection,
        action: TagAction,
        _: &(),
    ) -> Result<i64, TagError> {
        ensure_table(&mut *conn).await?;
        match action {
            TagAction::Pin(id) => {
                let done = sqlx::query("UPDATE tags SET pinned = 1 WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                Ok(done.rows_affected() as i64)
            }
            TagAction::Count => {
                let row = sqlx::query("SELECT COUNT(*) AS n FROM tags")
                    .fetch_one(&mut *conn)
                    .await?;
                Ok(row.try_get("n")?)
            }
        }
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let (actor, client) = ResourceActor::<Tag>::new(Store::open(dir.path().join("tags.db")), 10);
    let handle = tokio::spawn(actor.run(()));

    // 1. Create
    let id = client.create(TagCreate { label: "beta".into() }).await.unwrap();
    assert_eq!(id, 1);
    client.create(TagCreate { label: "alpha".into() }).await.unwrap();

    // 2. Action
    assert_eq!(client.perform_action(TagAction::Pin(id)).await.unwrap(), 1);
    assert!(client.get(id).await.unwrap().unwrap().pinned);
    assert_eq!(client.perform_action(TagAction::Count).await.unwrap(), 2);

    // 3. List keeps the entity's order
    let labels: Vec<String> = client.list(()).await.unwrap().into_iter().map(|t| t.label).collect();
    assert_eq!(labels, vec!["alpha", "beta"]);

    // 4. Update
    let updated = client.update(id, TagUpdate { label: "gamma".into() }).await.unwrap();
    assert_eq!(updated.label, "gamma");

    // 5. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_missing_rows_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (actor, client) = ResourceActor::<Tag>::new(Store::open(dir.path().join("tags.db")), 10);
    tokio::spawn(actor.run(()));

    let update = client.update(42, TagUpdate { label: "x".into() }).await;
    assert!(matches!(update, Err(FrameworkError::NotFound(id)) if id == "42"));

    let delete = client.delete(42).await;
    assert!(matches!(delete, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_entity_errors_survive_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (actor, client) = ResourceActor::<Tag>::new(Store::open(dir.path().join("tags.db")), 10);
    tokio::spawn(actor.run(()));

    let err = client.create(TagCreate { label: "  ".into() }).await.unwrap_err();
    assert!(matches!(err.downcast_entity::<TagError>(), Ok(TagError::EmptyLabel)));

    // The actor keeps serving after a failed request.
    assert!(client.create(TagCreate { label: "ok".into() }).await.is_ok());
}

#[tokio::test]
async fn test_store_failure_is_reported_per_request() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a database file.
    let (actor, client) = ResourceActor::<Tag>::new(Store::open(dir.path()), 10);
    tokio::spawn(actor.run(()));

    let first = client.list(()).await;
    assert!(matches!(first, Err(FrameworkError::Store(_))));
    let second = client.list(()).await;
    assert!(matches!(second, Err(FrameworkError::Store(_))));
}

#[tokio::test]
async fn test_mock_client_answers_in_order() {
    let mut mock = MockClient::<Tag>::new();
    mock.expect_create().return_ok(7);
    mock.expect_get().return_ok(Some(Tag { id: 7, label: "mocked".into(), pinned: false }));
    mock.expect_action().return_err(FrameworkError::ActorClosed);

    let client = mock.client();
    assert_eq!(client.create(TagCreate { label: "any".into() }).await.unwrap(), 7);
    assert_eq!(client.get(7).await.unwrap().unwrap().label, "mocked");
    assert!(matches!(
        client.perform_action(TagAction::Count).await,
        Err(FrameworkError::ActorClosed)
    ));

    mock.verify();
}

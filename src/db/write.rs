use poise::serenity_prelude::UserId;
use rusqlite::{params, Connection, Result};

/// Inserts a grant for the user. Returns `false` without touching the table if
/// the user already had one.
pub fn insert_grant(conn: &mut Connection, user: UserId) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO access_grants (user_id) VALUES (?1)",
        params![user.get()],
    )?;

    Ok(inserted > 0)
}

/// Deletes the user's grant, reporting whether one existed.
pub fn delete_grant(conn: &mut Connection, user: UserId) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM access_grants WHERE user_id=?1",
        params![user.get()],
    )?;

    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::read;

    fn test_conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        crate::db::initialise_tables(&mut conn).unwrap();
        conn
    }

    #[test]
    fn double_grant_is_idempotent() {
        let mut conn = test_conn();

        assert!(insert_grant(&mut conn, UserId::new(42)).unwrap());
        assert!(!insert_grant(&mut conn, UserId::new(42)).unwrap());

        assert_eq!(read::list_grants(&mut conn).unwrap().len(), 1);
    }

    #[test]
    fn revoke_reports_existence() {
        let mut conn = test_conn();

        insert_grant(&mut conn, UserId::new(42)).unwrap();
        assert!(delete_grant(&mut conn, UserId::new(42)).unwrap());
        assert!(!delete_grant(&mut conn, UserId::new(42)).unwrap());

        assert!(!read::find_grant(&mut conn, UserId::new(42)).unwrap());
    }
}

use poise::serenity_prelude::UserId;
use rusqlite::{params, Connection, OptionalExtension as _, Result};

pub fn find_grant(conn: &mut Connection, user: UserId) -> Result<bool> {
    conn.query_row(
        "SELECT user_id FROM access_grants WHERE user_id=?1",
        params![user.get()],
        |_| Ok(()),
    )
    .optional()
    .map(|row| row.is_some())
}

pub fn list_grants(conn: &mut Connection) -> Result<Vec<UserId>> {
    let mut statement = conn.prepare(
        "
        SELECT user_id FROM access_grants
        ORDER BY user_id ASC
        ",
    )?;

    let grants = statement
        .query_map([], |row| row.get::<_, u64>("user_id").map(UserId::new))?
        .collect::<Result<_>>()?;

    Ok(grants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::write;

    fn test_conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        crate::db::initialise_tables(&mut conn).unwrap();
        conn
    }

    #[test]
    fn find_missing_grant() {
        let mut conn = test_conn();
        assert!(!find_grant(&mut conn, UserId::new(42)).unwrap());
    }

    #[test]
    fn find_existing_grant() {
        let mut conn = test_conn();
        write::insert_grant(&mut conn, UserId::new(42)).unwrap();
        assert!(find_grant(&mut conn, UserId::new(42)).unwrap());
        assert!(!find_grant(&mut conn, UserId::new(43)).unwrap());
    }

    #[test]
    fn list_all_grants() {
        let mut conn = test_conn();
        write::insert_grant(&mut conn, UserId::new(7)).unwrap();
        write::insert_grant(&mut conn, UserId::new(3)).unwrap();

        assert_eq!(
            list_grants(&mut conn).unwrap(),
            vec![UserId::new(3), UserId::new(7)]
        );
    }
}

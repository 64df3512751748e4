use std::{path::Path, time::Duration};

use crate::server::model::user::User;


/// Polls until a background image deletion has removed `path`.
async fn wait_until_removed(path: &Path) -> bool {
    for _ in 0..100 {
        if !path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    !path.exists()
}

fn domain_user(entity: entity::user::Model) -> User {
    User::from_entity(entity)
}

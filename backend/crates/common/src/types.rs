use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a running process, served by `GET /info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub instance_id: Uuid,
}

impl ServiceInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            instance_id: Uuid::new_v4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_name_and_crate_version() {
        let info = ServiceInfo::new("persona-api");
        assert_eq!(info.name, "persona-api");
        assert!(!info.version.is_empty());
    }
}

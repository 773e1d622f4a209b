#[cfg(test)]
mod tests {
    use cainban::libs::config::{Config, CONFIG_FILE_NAME};
    use cainban::libs::data_storage::DataStorage;
    use cainban::libs::task::Priority;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
        storage: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::with_base_path(temp_dir.path().join("app"));
            ConfigTestContext { temp_dir, storage }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_board, "default");
        assert_eq!(config.default_priority().unwrap(), Priority::None);
        assert!(config.confirm_hard_delete);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.set("default_board", "work").unwrap();
        config.set("default_priority", "3").unwrap();
        config.set("confirm_hard_delete", "false").unwrap();
        config.save_to(&ctx.storage).unwrap();

        assert!(ctx.temp_dir.path().join("app").join(CONFIG_FILE_NAME).exists());

        let loaded = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.default_priority().unwrap(), Priority::High);
        assert!(!loaded.confirm_hard_delete);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupt_file_is_an_error(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        fs::write(path, "{ not json").unwrap();

        assert!(Config::read_from(&ctx.storage).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_rejected_update_leaves_config_unchanged(ctx: &mut ConfigTestContext) {
        let mut config = Config::read_from(&ctx.storage).unwrap();

        assert!(config.set("default_priority", "urgent").is_err());
        assert!(config.set("unknown_key", "x").is_err());
        assert_eq!(config, Config::default());
    }
}

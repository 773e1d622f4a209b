#[cfg(test)]
mod tests {
    use cainban::db::db::Db;
    use cainban::db::tasks::Tasks;
    use cainban::libs::board::{BoardRegistry, DEFAULT_BOARD};
    use cainban::libs::data_storage::DataStorage;
    use cainban::libs::error::TaskError;
    use cainban::libs::task::DEFAULT_BOARD_ID;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct BoardTestContext {
        temp_dir: TempDir,
        registry: BoardRegistry,
    }

    impl TestContext for BoardTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let registry = BoardRegistry::new(DataStorage::with_base_path(temp_dir.path()));
            BoardTestContext { temp_dir, registry }
        }
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_board_paths(ctx: &mut BoardTestContext) {
        let base = ctx.temp_dir.path();

        assert_eq!(ctx.registry.board_path(DEFAULT_BOARD), base.join("cainban.db"));
        assert_eq!(ctx.registry.board_path(""), base.join("cainban.db"));
        assert_eq!(ctx.registry.board_path("work"), base.join("boards").join("work.db"));
        assert_eq!(ctx.registry.board_path("my project"), base.join("boards").join("my_project.db"));
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_current_board_marker(ctx: &mut BoardTestContext) {
        assert_eq!(ctx.registry.current_board().unwrap(), DEFAULT_BOARD);

        ctx.registry.set_current_board("work").unwrap();
        assert_eq!(ctx.registry.current_board().unwrap(), "work");
        assert!(ctx.temp_dir.path().join("current-board").exists());

        // Selecting the default board clears the marker.
        ctx.registry.set_current_board(DEFAULT_BOARD).unwrap();
        assert_eq!(ctx.registry.current_board().unwrap(), DEFAULT_BOARD);
        assert!(!ctx.temp_dir.path().join("current-board").exists());
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_configured_default_board(ctx: &mut BoardTestContext) {
        let registry = BoardRegistry::new(DataStorage::with_base_path(ctx.temp_dir.path())).with_default_board("work");
        assert_eq!(registry.current_board().unwrap(), "work");

        let blank = BoardRegistry::new(DataStorage::with_base_path(ctx.temp_dir.path())).with_default_board("  ");
        assert_eq!(blank.current_board().unwrap(), DEFAULT_BOARD);
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_switch_to_default_with_configured_default(ctx: &mut BoardTestContext) {
        let registry = BoardRegistry::new(DataStorage::with_base_path(ctx.temp_dir.path())).with_default_board("work");
        registry.create_board("work", "").unwrap();
        registry.create_board("other", "").unwrap();

        registry.set_current_board("other").unwrap();
        assert_eq!(registry.current_board().unwrap(), "other");

        assert_eq!(registry.set_current_board(DEFAULT_BOARD).unwrap(), DEFAULT_BOARD);
        assert_eq!(registry.current_board().unwrap(), DEFAULT_BOARD);

        // Choosing the configured default needs no marker.
        registry.set_current_board("work").unwrap();
        assert_eq!(registry.current_board().unwrap(), "work");
        assert!(!ctx.temp_dir.path().join("current-board").exists());
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_delete_configured_default_board(ctx: &mut BoardTestContext) {
        let registry = BoardRegistry::new(DataStorage::with_base_path(ctx.temp_dir.path())).with_default_board("work");
        registry.create_board("work", "").unwrap();
        assert_eq!(registry.current_board().unwrap(), "work");

        registry.delete_board("work").unwrap();

        assert_eq!(registry.current_board().unwrap(), DEFAULT_BOARD);
        assert!(!registry.exists("work"));
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_current_board_is_stored_sanitized(ctx: &mut BoardTestContext) {
        let board = ctx.registry.create_board("My Board", "").unwrap();
        assert_eq!(board.name, "My_Board");

        assert_eq!(ctx.registry.set_current_board("My Board").unwrap(), "My_Board");
        assert_eq!(ctx.registry.current_board().unwrap(), "My_Board");

        ctx.registry.delete_board("My_Board").unwrap();
        assert!(!board.path.exists());
        assert_eq!(ctx.registry.current_board().unwrap(), DEFAULT_BOARD);
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_create_board(ctx: &mut BoardTestContext) {
        let board = ctx.registry.create_board("work", "Day job").unwrap();
        assert_eq!(board.name, "work");
        assert_eq!(board.description, "Day job");
        assert!(board.path.exists());
        assert!(ctx.registry.exists("work"));

        // The new store is initialized and usable.
        let db = Db::open(&board.path).unwrap();
        Tasks::new(&db).create_task(DEFAULT_BOARD_ID, "First", "", None).unwrap();

        let err = ctx.registry.create_board("work", "").unwrap_err();
        assert!(matches!(err, TaskError::Conflict(_)));
        assert_eq!(err.to_string(), "board 'work' already exists");

        assert!(matches!(ctx.registry.create_board("  ", ""), Err(TaskError::Validation(_))));
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_list_boards(ctx: &mut BoardTestContext) {
        assert!(ctx.registry.list_boards().unwrap().is_empty());

        ctx.registry.create_board("zeta", "Last").unwrap();
        ctx.registry.create_board("alpha", "First").unwrap();
        drop(Db::open(ctx.registry.board_path(DEFAULT_BOARD)).unwrap());

        let boards = ctx.registry.list_boards().unwrap();
        let names: Vec<&str> = boards.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec![DEFAULT_BOARD, "alpha", "zeta"]);
        assert_eq!(boards[0].description, "Default kanban board");
        assert_eq!(boards[1].description, "First");
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_get_board(ctx: &mut BoardTestContext) {
        ctx.registry.create_board("my project", "").unwrap();

        assert_eq!(ctx.registry.get_board("my project").unwrap().name, "my_project");

        let err = ctx.registry.get_board("missing").unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
        assert_eq!(err.to_string(), "board 'missing' not found");
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_delete_board(ctx: &mut BoardTestContext) {
        let board = ctx.registry.create_board("scratch", "").unwrap();
        ctx.registry.set_current_board("scratch").unwrap();

        ctx.registry.delete_board("scratch").unwrap();
        assert!(!board.path.exists());
        assert_eq!(ctx.registry.current_board().unwrap(), DEFAULT_BOARD);

        let err = ctx.registry.delete_board("scratch").unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
        assert_eq!(err.to_string(), "board 'scratch' does not exist");
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_default_board_cannot_be_deleted(ctx: &mut BoardTestContext) {
        drop(Db::open(ctx.registry.board_path(DEFAULT_BOARD)).unwrap());

        let err = ctx.registry.delete_board(DEFAULT_BOARD).unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert!(ctx.registry.board_path(DEFAULT_BOARD).exists());
    }

    #[test_context(BoardTestContext)]
    #[test]
    fn test_boards_are_isolated(ctx: &mut BoardTestContext) {
        let work = ctx.registry.create_board("work", "").unwrap();
        let default_db = Db::open(ctx.registry.board_path(DEFAULT_BOARD)).unwrap();
        let work_db = Db::open(&work.path).unwrap();

        Tasks::new(&default_db).create_task(DEFAULT_BOARD_ID, "Home chore", "", None).unwrap();

        assert!(Tasks::new(&work_db).list_tasks(DEFAULT_BOARD_ID).unwrap().is_empty());
        assert_eq!(Tasks::new(&default_db).list_tasks(DEFAULT_BOARD_ID).unwrap().len(), 1);
    }
}

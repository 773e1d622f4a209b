#[cfg(test)]
mod tests {
    use cainban::db::db::Db;
    use cainban::db::tasks::Tasks;
    use cainban::libs::error::TaskError;
    use cainban::libs::task::{Priority, PriorityInput, Status, DEFAULT_BOARD_ID};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("cainban.db")).unwrap();
            TaskTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_task_defaults(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let task = tasks.create_task(DEFAULT_BOARD_ID, "  Fix login bug  ", "Users cannot log in", None).unwrap();
        assert!(task.id > 0);
        assert_eq!(task.board_id, DEFAULT_BOARD_ID);
        assert_eq!(task.title, "Fix login bug");
        assert_eq!(task.description, "Users cannot log in");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::None);
        assert!(task.deleted_at.is_none());
        assert_eq!(task.created_at, task.updated_at);

        assert_eq!(tasks.get_task(task.id).unwrap(), task);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_task_with_priority(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let named = tasks.create_task(DEFAULT_BOARD_ID, "Named", "", Some("Critical".into())).unwrap();
        assert_eq!(named.priority, Priority::Critical);

        let numeric = tasks.create_task(DEFAULT_BOARD_ID, "Numeric", "", Some(PriorityInput::Numeric(2))).unwrap();
        assert_eq!(numeric.priority, Priority::Medium);

        let err = tasks.create_task(DEFAULT_BOARD_ID, "Bad", "", Some(PriorityInput::Numeric(7))).unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        let err = tasks.create_task(DEFAULT_BOARD_ID, "Bad", "", Some("urgent".into())).unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));

        assert_eq!(tasks.list_tasks(DEFAULT_BOARD_ID).unwrap().len(), 2);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_task_rejects_bad_titles(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        assert!(matches!(tasks.create_task(DEFAULT_BOARD_ID, "   ", "", None), Err(TaskError::Validation(_))));
        assert!(matches!(
            tasks.create_task(DEFAULT_BOARD_ID, &"x".repeat(256), "", None),
            Err(TaskError::Validation(_))
        ));
        assert!(tasks.create_task(DEFAULT_BOARD_ID, &"x".repeat(255), "", None).is_ok());
        // Multi-byte characters count once each.
        assert!(tasks.create_task(DEFAULT_BOARD_ID, &"é".repeat(255), "", None).is_ok());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_task_on_unknown_board(ctx: &mut TaskTestContext) {
        let err = Tasks::new(&ctx.db).create_task(42, "Orphan", "", None).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
        assert_eq!(err.to_string(), "board 42 not found");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_get_missing_task(ctx: &mut TaskTestContext) {
        let err = Tasks::new(&ctx.db).get_task(999).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
        assert_eq!(err.to_string(), "task 999 not found");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_orders_by_priority_then_creation(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let t1 = tasks.create_task(DEFAULT_BOARD_ID, "T1", "", Some("low".into())).unwrap();
        let t2 = tasks.create_task(DEFAULT_BOARD_ID, "T2", "", Some("critical".into())).unwrap();
        let t3 = tasks.create_task(DEFAULT_BOARD_ID, "T3", "", Some("low".into())).unwrap();

        let ids: Vec<i64> = tasks.list_tasks(DEFAULT_BOARD_ID).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![t2.id, t1.id, t3.id]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_by_status(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);

        let a = tasks.create_task(DEFAULT_BOARD_ID, "A", "", None).unwrap();
        let b = tasks.create_task(DEFAULT_BOARD_ID, "B", "", Some("high".into())).unwrap();
        tasks.create_task(DEFAULT_BOARD_ID, "C", "", None).unwrap();
        tasks.update_task_status(a.id, Status::Doing).unwrap();
        tasks.update_task_status(b.id, Status::Doing).unwrap();

        let doing: Vec<i64> = tasks
            .list_tasks_by_status(DEFAULT_BOARD_ID, Status::Doing)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(doing, vec![b.id, a.id]);
        assert_eq!(tasks.list_tasks_by_status(DEFAULT_BOARD_ID, Status::Todo).unwrap().len(), 1);
        assert!(tasks.list_tasks_by_status(DEFAULT_BOARD_ID, Status::Done).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_every_status_transition_is_allowed(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create_task(DEFAULT_BOARD_ID, "Wander", "", None).unwrap();

        for from in Status::ALL {
            for to in Status::ALL {
                tasks.update_task_status(task.id, from).unwrap();
                tasks.update_task_status(task.id, to).unwrap();
                assert_eq!(tasks.get_task(task.id).unwrap().status, to);
            }
        }

        assert!(matches!(tasks.update_task_status(999, Status::Done), Err(TaskError::NotFound(_))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_task_fields(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create_task(DEFAULT_BOARD_ID, "Original", "Old description", None).unwrap();

        tasks.update_task(task.id, "  Renamed  ", "").unwrap();
        let updated = tasks.get_task(task.id).unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "");
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at >= task.updated_at);

        assert!(matches!(tasks.update_task(task.id, "", "x"), Err(TaskError::Validation(_))));
        assert!(matches!(tasks.update_task(999, "Title", ""), Err(TaskError::NotFound(_))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_priority(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create_task(DEFAULT_BOARD_ID, "Prioritize me", "", None).unwrap();

        assert_eq!(tasks.update_task_priority(task.id, &"HIGH".into()).unwrap(), Priority::High);
        assert_eq!(tasks.get_task(task.id).unwrap().priority, Priority::High);

        assert_eq!(tasks.update_task_priority(task.id, &PriorityInput::Numeric(0)).unwrap(), Priority::None);

        assert!(matches!(
            tasks.update_task_priority(task.id, &PriorityInput::Numeric(5)),
            Err(TaskError::Validation(_))
        ));
        assert!(matches!(
            tasks.update_task_priority(999, &PriorityInput::Numeric(1)),
            Err(TaskError::NotFound(_))
        ));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_mutations_skip_soft_deleted_rows(ctx: &mut TaskTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let task = tasks.create_task(DEFAULT_BOARD_ID, "Gone", "", None).unwrap();
        tasks.soft_delete(task.id).unwrap();

        assert!(matches!(tasks.update_task_status(task.id, Status::Done), Err(TaskError::NotFound(_))));
        assert!(matches!(tasks.update_task(task.id, "Back", ""), Err(TaskError::NotFound(_))));
        assert!(matches!(
            tasks.update_task_priority(task.id, &"high".into()),
            Err(TaskError::NotFound(_))
        ));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_tasks_are_board_scoped(ctx: &mut TaskTestContext) {
        ctx.db
            .conn
            .execute("INSERT INTO boards (id, name) VALUES (2, 'Side project')", [])
            .unwrap();
        let tasks = Tasks::new(&ctx.db);

        tasks.create_task(DEFAULT_BOARD_ID, "Main", "", None).unwrap();
        let side = tasks.create_task(2, "Side", "", None).unwrap();

        let listed = tasks.list_tasks(2).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, side.id);
        assert_eq!(tasks.list_tasks(DEFAULT_BOARD_ID).unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_data_survives_reopen(ctx: &mut TaskTestContext) {
        let path = ctx.db.path().unwrap().to_path_buf();
        let created = Tasks::new(&ctx.db)
            .create_task(DEFAULT_BOARD_ID, "Persistent", "", Some("medium".into()))
            .unwrap();

        let reopened = Db::open(&path).unwrap();
        assert_eq!(Tasks::new(&reopened).get_task(created.id).unwrap(), created);
    }
}

#[cfg(test)]
mod tests {
    use cainban::db::db::Db;
    use cainban::db::links::Links;
    use cainban::db::tasks::Tasks;
    use cainban::libs::error::TaskError;
    use cainban::libs::task::{LinkType, Task, DEFAULT_BOARD_ID};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct LinkTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for LinkTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("cainban.db")).unwrap();
            LinkTestContext { _temp_dir: temp_dir, db }
        }
    }

    fn create(db: &Db, title: &str) -> Task {
        Tasks::new(db).create_task(DEFAULT_BOARD_ID, title, "", None).unwrap()
    }

    #[test_context(LinkTestContext)]
    #[test]
    fn test_link_and_read_back(ctx: &mut LinkTestContext) {
        let a = create(&ctx.db, "Design schema");
        let b = create(&ctx.db, "Write migrations");
        let links = Links::new(&ctx.db);

        let link = links.link_tasks(a.id, b.id, LinkType::Blocks).unwrap();
        assert_eq!(link.from_task_id, a.id);
        assert_eq!(link.to_task_id, b.id);
        assert_eq!(link.link_type, LinkType::Blocks);

        // Visible from both endpoints.
        assert_eq!(links.get_task_links(a.id).unwrap(), vec![link.clone()]);
        assert_eq!(links.get_task_links(b.id).unwrap(), vec![link.clone()]);

        assert_eq!(link.describe_for(a.id), format!("blocks task {}", b.id));
        assert_eq!(link.describe_for(b.id), format!("blocks by task {}", a.id));
    }

    #[test_context(LinkTestContext)]
    #[test]
    fn test_self_link_is_rejected(ctx: &mut LinkTestContext) {
        let a = create(&ctx.db, "Lonely");
        let links = Links::new(&ctx.db);

        let err = links.link_tasks(a.id, a.id, LinkType::Related).unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert_eq!(err.to_string(), "cannot link task to itself");

        // Checked before the task lookup.
        assert!(matches!(links.link_tasks(999, 999, LinkType::Blocks), Err(TaskError::Validation(_))));
        assert!(links.get_task_links(a.id).unwrap().is_empty());
    }

    #[test_context(LinkTestContext)]
    #[test]
    fn test_duplicate_link_conflicts(ctx: &mut LinkTestContext) {
        let a = create(&ctx.db, "A");
        let b = create(&ctx.db, "B");
        let links = Links::new(&ctx.db);

        links.link_tasks(a.id, b.id, LinkType::Blocks).unwrap();
        let err = links.link_tasks(a.id, b.id, LinkType::Blocks).unwrap_err();
        assert!(matches!(err, TaskError::Conflict(_)));
        assert_eq!(links.get_task_links(a.id).unwrap().len(), 1);

        // Another type or the reverse direction is a different edge.
        links.link_tasks(a.id, b.id, LinkType::Related).unwrap();
        links.link_tasks(b.id, a.id, LinkType::Blocks).unwrap();
        assert_eq!(links.get_task_links(a.id).unwrap().len(), 3);
    }

    #[test_context(LinkTestContext)]
    #[test]
    fn test_link_requires_active_endpoints(ctx: &mut LinkTestContext) {
        let a = create(&ctx.db, "A");
        let b = create(&ctx.db, "B");
        let links = Links::new(&ctx.db);

        assert!(matches!(links.link_tasks(a.id, 999, LinkType::Blocks), Err(TaskError::NotFound(_))));
        assert!(matches!(links.link_tasks(999, a.id, LinkType::Blocks), Err(TaskError::NotFound(_))));

        Tasks::new(&ctx.db).soft_delete(b.id).unwrap();
        assert!(matches!(links.link_tasks(a.id, b.id, LinkType::Blocks), Err(TaskError::NotFound(_))));
    }

    #[test_context(LinkTestContext)]
    #[test]
    fn test_unlink(ctx: &mut LinkTestContext) {
        let a = create(&ctx.db, "A");
        let b = create(&ctx.db, "B");
        let links = Links::new(&ctx.db);
        links.link_tasks(a.id, b.id, LinkType::DependsOn).unwrap();

        let err = links.unlink_tasks(a.id, b.id, LinkType::Blocks).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            format!("no link found between tasks {} and {} with type blocks", a.id, b.id)
        );
        assert!(matches!(links.unlink_tasks(b.id, a.id, LinkType::DependsOn), Err(TaskError::NotFound(_))));

        links.unlink_tasks(a.id, b.id, LinkType::DependsOn).unwrap();
        assert!(links.get_task_links(a.id).unwrap().is_empty());

        // The edge can be recreated once removed.
        links.link_tasks(a.id, b.id, LinkType::DependsOn).unwrap();
    }

    #[test_context(LinkTestContext)]
    #[test]
    fn test_links_most_recent_first(ctx: &mut LinkTestContext) {
        let hub = create(&ctx.db, "Hub");
        let first = create(&ctx.db, "First");
        let second = create(&ctx.db, "Second");
        let third = create(&ctx.db, "Third");
        let links = Links::new(&ctx.db);

        let l1 = links.link_tasks(hub.id, first.id, LinkType::Blocks).unwrap();
        let l2 = links.link_tasks(second.id, hub.id, LinkType::BlockedBy).unwrap();
        let l3 = links.link_tasks(hub.id, third.id, LinkType::Related).unwrap();

        let ids: Vec<i64> = links.get_task_links(hub.id).unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![l3.id, l2.id, l1.id]);
    }

    #[test_context(LinkTestContext)]
    #[test]
    fn test_every_link_type_round_trips(ctx: &mut LinkTestContext) {
        let a = create(&ctx.db, "A");
        let b = create(&ctx.db, "B");
        let links = Links::new(&ctx.db);

        for link_type in LinkType::ALL {
            assert_eq!(links.link_tasks(a.id, b.id, link_type).unwrap().link_type, link_type);
        }

        let mut stored: Vec<LinkType> = links.get_task_links(a.id).unwrap().iter().map(|l| l.link_type).collect();
        stored.reverse();
        assert_eq!(stored, LinkType::ALL.to_vec());
    }
}

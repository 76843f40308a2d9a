//! Behavioural tests for duplicate-safe user reconciliation.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use futures::executor::block_on;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use user_directory::domain::ports::NoticeKind;
use user_directory::domain::{
    DeleteOutcome, ErrorKind, OptimisticWrites, ReconcileError, ServerAuthoritativeWrites, User,
    UserDirectoryService, UserId, UserStore, WriteStrategy,
};

mod directory_support;

use directory_support::{InMemoryUserSource, RecordingNotificationSink, user};

type Service = UserDirectoryService<InMemoryUserSource, RecordingNotificationSink>;

#[derive(Default)]
struct Outcome {
    last_error: Option<ReconcileError>,
    last_delete: Option<DeleteOutcome>,
}

struct DirectoryWorld {
    service: Service,
    source: Arc<InMemoryUserSource>,
    notifier: Arc<RecordingNotificationSink>,
    outcome: RefCell<Outcome>,
}

impl DirectoryWorld {
    fn cached(&self) -> Vec<User> {
        block_on(self.service.store().snapshot())
    }

    fn record<T>(&self, result: Result<T, ReconcileError>) {
        self.outcome.borrow_mut().last_error = result.err();
    }

    fn last_error(&self) -> Option<ReconcileError> {
        self.outcome.borrow().last_error.clone()
    }
}

fn world_with(source: InMemoryUserSource, server_confirms: bool) -> DirectoryWorld {
    let source = Arc::new(source);
    let notifier = Arc::new(RecordingNotificationSink::answering(true));
    let writes: Arc<dyn WriteStrategy> = if server_confirms {
        Arc::new(ServerAuthoritativeWrites::new(Arc::clone(&source)))
    } else {
        Arc::new(OptimisticWrites)
    };
    let service = UserDirectoryService::new(
        Arc::new(UserStore::new()),
        Arc::clone(&source),
        Arc::clone(&notifier),
        writes,
    );
    DirectoryWorld {
        service,
        source,
        notifier,
        outcome: RefCell::default(),
    }
}

#[fixture]
fn remote_users() -> Vec<User> {
    vec![
        user(1, "Ann", "ann1", "a@x.com"),
        user(2, "Bo", "bo2", "b@x.com"),
    ]
}

#[fixture]
fn world(remote_users: Vec<User>) -> DirectoryWorld {
    world_with(InMemoryUserSource::with_users(remote_users), false)
}

#[given("a directory loaded from the remote source")]
fn a_directory_loaded_from_the_remote_source(world: &DirectoryWorld) {
    let result = block_on(world.service.load());
    world.record(result);
    assert!(world.last_error().is_none(), "load failed: {:?}", world.last_error());
}

#[given("the remote source is unreachable")]
fn the_remote_source_is_unreachable(world: &DirectoryWorld) {
    world.source.go_offline();
}

#[given("the user declines confirmation prompts")]
fn the_user_declines_confirmation_prompts(world: &DirectoryWorld) {
    world.notifier.set_answer(false);
}

#[when("a user is added")]
fn a_user_is_added(world: &DirectoryWorld, candidate: User) {
    let result = block_on(world.service.add_user(candidate));
    world.record(result);
}

#[when("a user is edited")]
fn a_user_is_edited(world: &DirectoryWorld, updated: User) {
    let result = block_on(world.service.edit_user(updated));
    world.record(result);
}

#[when("a user is deleted")]
fn a_user_is_deleted(world: &DirectoryWorld, id: UserId) {
    let outcome = block_on(world.service.delete_user(id));
    world.outcome.borrow_mut().last_delete = Some(outcome);
}

#[when("the directory is refreshed")]
fn the_directory_is_refreshed(world: &DirectoryWorld) {
    let result = block_on(world.service.refresh());
    world.record(result);
}

#[then("the directory is unchanged")]
fn the_directory_is_unchanged(world: &DirectoryWorld, remote_users: Vec<User>) {
    assert_eq!(world.cached(), remote_users);
}

fn the_operation_is_refused_as(world: &DirectoryWorld, kind: ErrorKind) {
    let error = world.last_error().expect("operation should fail");
    assert_eq!(error.kind(), kind);
}

fn the_directory_lists(world: &DirectoryWorld, expected: &[User]) {
    assert_eq!(world.cached(), expected);
}

fn the_user_is_told(world: &DirectoryWorld, kind: NoticeKind, message: &str) {
    assert!(
        world.notifier.saw(kind, message),
        "missing {kind} notice '{message}', got {:?}",
        world.notifier.notices()
    );
}

#[rstest]
fn duplicate_username_is_refused(world: DirectoryWorld, remote_users: Vec<User>) {
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_added(&world, user(3, "Cy", "ANN1", "c@x.com"));
    the_operation_is_refused_as(&world, ErrorKind::ValidationConflict);
    the_directory_is_unchanged(&world, remote_users.clone());
    the_user_is_told(
        &world,
        NoticeKind::Warning,
        "Username \"ANN1\" is already taken.",
    );
}

#[rstest]
fn duplicate_email_is_refused_regardless_of_case(
    world: DirectoryWorld,
    remote_users: Vec<User>,
) {
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_added(&world, user(3, "Cy", "cy3", "  B@X.COM"));
    the_operation_is_refused_as(&world, ErrorKind::ValidationConflict);
    the_directory_is_unchanged(&world, remote_users.clone());
}

#[rstest]
fn unique_user_is_appended(world: DirectoryWorld, remote_users: Vec<User>) {
    let added = user(3, "Cy", "cy3", "c@x.com");
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_added(&world, added.clone());

    let mut expected = remote_users;
    expected.push(added);
    the_directory_lists(&world, &expected);
    the_user_is_told(&world, NoticeKind::Success, "User \"Cy\" added successfully.");
}

#[rstest]
fn identical_edit_is_a_no_op(world: DirectoryWorld, remote_users: Vec<User>) {
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_edited(&world, user(1, "Ann", "ann1", "a@x.com"));
    the_operation_is_refused_as(&world, ErrorKind::NoOpEdit);
    the_directory_is_unchanged(&world, remote_users.clone());
    the_user_is_told(&world, NoticeKind::Info, "No changes were made.");
}

#[rstest]
fn edit_of_missing_user_is_not_found(world: DirectoryWorld) {
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_edited(&world, user(7, "Gus", "gus", "g@x.com"));
    the_operation_is_refused_as(&world, ErrorKind::NotFound);
    the_user_is_told(&world, NoticeKind::Warning, "User not found.");
}

#[rstest]
fn edit_keeps_position_in_list(world: DirectoryWorld) {
    let renamed = user(1, "Ann Lee", "ann1", "a@x.com");
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_edited(&world, renamed.clone());
    the_directory_lists(&world, &[renamed, user(2, "Bo", "bo2", "b@x.com")]);
}

#[rstest]
fn declined_delete_keeps_user(world: DirectoryWorld, remote_users: Vec<User>) {
    a_directory_loaded_from_the_remote_source(&world);
    the_user_declines_confirmation_prompts(&world);
    a_user_is_deleted(&world, UserId::new(1).expect("valid id"));
    assert_eq!(
        world.outcome.borrow().last_delete,
        Some(DeleteOutcome::Declined)
    );
    the_directory_is_unchanged(&world, remote_users.clone());
    let prompts = world.notifier.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].message, "Are you sure you want to delete this user?");
}

#[rstest]
fn confirmed_delete_is_local_only(world: DirectoryWorld, remote_users: Vec<User>) {
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_deleted(&world, UserId::new(1).expect("valid id"));
    the_directory_lists(&world, &[user(2, "Bo", "bo2", "b@x.com")]);
    the_user_is_told(&world, NoticeKind::Success, "User ID 1 deleted.");
    assert_eq!(world.source.remote_users(), remote_users);
}

#[rstest]
fn failed_refresh_keeps_cache(world: DirectoryWorld, remote_users: Vec<User>) {
    a_directory_loaded_from_the_remote_source(&world);
    the_remote_source_is_unreachable(&world);
    the_directory_is_refreshed(&world);
    the_operation_is_refused_as(&world, ErrorKind::NetworkError);
    the_directory_is_unchanged(&world, remote_users.clone());
    the_user_is_told(&world, NoticeKind::Error, "Failed to refresh users.");
}

#[rstest]
fn failed_initial_load_is_recorded(world: DirectoryWorld) {
    the_remote_source_is_unreachable(&world);
    let result = block_on(world.service.load());
    assert!(result.is_err());
    the_user_is_told(&world, NoticeKind::Error, "Error loading user data.");
    let cache = block_on(world.service.store().lock());
    assert_eq!(cache.last_load_error(), Some("Failed to load users."));
    assert!(cache.is_empty());
}

#[rstest]
fn refresh_discards_local_only_changes(world: DirectoryWorld, remote_users: Vec<User>) {
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_added(&world, user(3, "Cy", "cy3", "c@x.com"));
    the_directory_is_refreshed(&world);
    the_directory_is_unchanged(&world, remote_users.clone());
    the_directory_is_refreshed(&world);
    the_directory_is_unchanged(&world, remote_users.clone());
}

#[rstest]
fn server_confirmed_record_is_cached(remote_users: Vec<User>) {
    let world = world_with(
        InMemoryUserSource::with_users(remote_users).assigning_id(11),
        true,
    );
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_added(&world, user(3, "Cy", "cy3", "c@x.com"));

    let cached = world.cached();
    assert_eq!(cached.len(), 3);
    assert_eq!(cached[2].id().get(), 11);
}

#[rstest]
fn server_assigned_collision_is_refused(remote_users: Vec<User>) {
    let world = world_with(
        InMemoryUserSource::with_users(remote_users.clone()).assigning_id(2),
        true,
    );
    a_directory_loaded_from_the_remote_source(&world);
    a_user_is_added(&world, user(3, "Cy", "cy3", "c@x.com"));
    the_operation_is_refused_as(&world, ErrorKind::ValidationConflict);
    the_directory_is_unchanged(&world, remote_users.clone());
    the_user_is_told(&world, NoticeKind::Warning, "User with ID 2 already exists.");
}

#[rstest]
fn server_write_failure_leaves_cache(remote_users: Vec<User>) {
    let world = world_with(InMemoryUserSource::with_users(remote_users.clone()), true);
    a_directory_loaded_from_the_remote_source(&world);
    the_remote_source_is_unreachable(&world);
    a_user_is_added(&world, user(3, "Cy", "cy3", "c@x.com"));
    the_operation_is_refused_as(&world, ErrorKind::NetworkError);
    the_directory_is_unchanged(&world, remote_users.clone());
    the_user_is_told(&world, NoticeKind::Error, "Failed to add user.");
}

#[rstest]
#[tokio::test]
async fn refresh_waits_for_in_flight_add(remote_users: Vec<User>) {
    let source = InMemoryUserSource::with_users(remote_users)
        .assigning_id(11)
        .with_write_delay(Duration::from_millis(50));
    let world = world_with(source, true);
    world.service.load().await.expect("initial load");

    let add = world.service.add_user(user(3, "Cy", "cy3", "c@x.com"));
    let refresh = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        world.service.refresh().await
    };
    let (added, refreshed) = tokio::join!(add, refresh);

    added.expect("add succeeds");
    assert_eq!(refreshed.expect("refresh succeeds"), 3);
    let ids: Vec<i64> = world
        .service
        .store()
        .snapshot()
        .await
        .iter()
        .map(|cached| cached.id().get())
        .collect();
    assert_eq!(ids, vec![1, 2, 11]);
}

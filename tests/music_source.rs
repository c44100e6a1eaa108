mod common;

use std::sync::{Arc, Mutex};

use howl::source::{MusicSource, Readiness, MISSING_FIELD};

use common::{song, three_songs, FakeRepository};

fn recorder() -> (Arc<Mutex<Vec<bool>>>, impl Fn() -> Box<dyn FnOnce(bool) + Send>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let make = move || {
        let sink = Arc::clone(&sink);
        Box::new(move |ok: bool| sink.lock().unwrap().push(ok)) as Box<dyn FnOnce(bool) + Send>
    };
    (seen, make)
}

#[tokio::test]
async fn three_songs_load_in_order_and_release_callbacks_with_success() {
    let source = MusicSource::new(Arc::new(FakeRepository::with_songs(three_songs())));
    assert_eq!(source.readiness(), Readiness::Initializing);

    let (seen, make) = recorder();
    assert!(!source.when_ready(make()));
    assert!(!source.when_ready(make()));
    assert!(seen.lock().unwrap().is_empty());

    source.load().await;

    assert_eq!(source.readiness(), Readiness::Initialized);
    assert_eq!(*seen.lock().unwrap(), vec![true, true]);

    let titles: Vec<String> = source.as_browsable_items().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn fetch_failure_leaves_error_state_and_empty_list() {
    let source = MusicSource::new(Arc::new(FakeRepository::failing()));

    let (seen, make) = recorder();
    source.when_ready(make());
    source.when_ready(make());
    source.when_ready(make());

    source.load().await;

    assert_eq!(source.readiness(), Readiness::Error);
    assert!(source.is_empty());
    assert!(source.as_browsable_items().is_empty());
    assert!(source.as_queue().is_empty());
    assert_eq!(*seen.lock().unwrap(), vec![false, false, false]);
    assert!(source.last_error().unwrap_or_default().contains("disk on fire"));
}

#[tokio::test]
async fn late_when_ready_runs_synchronously() {
    let source = MusicSource::new(Arc::new(FakeRepository::with_songs(three_songs())));
    source.load().await;

    let (seen, make) = recorder();
    assert!(source.when_ready(make()));
    assert_eq!(*seen.lock().unwrap(), vec![true]);
}

#[tokio::test]
async fn late_when_ready_after_failure_still_runs_immediately() {
    let source = MusicSource::new(Arc::new(FakeRepository::failing()));
    source.load().await;

    let (seen, make) = recorder();
    assert!(source.when_ready(make()));
    assert_eq!(*seen.lock().unwrap(), vec![false]);
}

#[tokio::test]
async fn queue_has_one_entry_per_song_in_order() {
    let source = MusicSource::new(Arc::new(FakeRepository::with_songs(three_songs())));
    source.load().await;

    let queue = source.as_queue();
    let ids: Vec<&str> = queue.iter().map(|e| e.media_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(queue.get(2).map(|e| e.uri.as_str()), Some("/music/c.mp3"));
    assert_eq!(queue.position_of("b"), Some(1));
}

#[tokio::test]
async fn empty_library_is_ready_not_an_error() {
    let source = MusicSource::new(Arc::new(FakeRepository::with_songs(Vec::new())));
    source.load().await;

    assert_eq!(source.readiness(), Readiness::Initialized);
    assert!(source.ready().await);
    assert!(source.as_queue().is_empty());
}

#[tokio::test]
async fn ready_resolves_for_waiters_before_and_after_load() {
    let source = Arc::new(MusicSource::new(Arc::new(FakeRepository::with_songs(three_songs()))));

    let early = {
        let source = Arc::clone(&source);
        tokio::spawn(async move { source.ready().await })
    };
    tokio::task::yield_now().await;

    source.load().await;

    assert!(early.await.unwrap());
    assert!(source.ready().await);
}

#[tokio::test]
async fn missing_ids_and_uris_use_the_placeholder() {
    let mut broken = song("", "No Id", 1, 1000);
    broken.uri = String::new();
    let source = MusicSource::new(Arc::new(FakeRepository::with_songs(vec![broken])));
    source.load().await;

    let item = &source.as_browsable_items()[0];
    assert_eq!(item.media_id, MISSING_FIELD);
    assert_eq!(item.media_uri, MISSING_FIELD);

    let queue = source.as_queue();
    let entry = queue.get(0).unwrap();
    assert_eq!(entry.media_id, MISSING_FIELD);
    assert_eq!(entry.uri, MISSING_FIELD);
}

#[tokio::test]
async fn second_load_refreshes_the_list_but_not_the_state() {
    let repo = Arc::new(FakeRepository::with_songs(three_songs()));
    let source = MusicSource::new(repo.clone());

    source.load().await;
    source.load().await;

    assert_eq!(repo.fetches(), 2);
    assert_eq!(source.readiness(), Readiness::Initialized);
    assert_eq!(source.len(), 3);
}

#[tokio::test]
async fn failed_reload_keeps_the_loaded_library() {
    let repo = Arc::new(FakeRepository::with_fetch_failures(three_songs(), |n| n > 0));
    let source = MusicSource::new(repo.clone());

    source.load().await;
    source.load().await;

    assert_eq!(repo.fetches(), 2);
    assert_eq!(source.readiness(), Readiness::Initialized);
    assert_eq!(source.len(), 3);
    assert_eq!(source.as_queue().len(), 3);
    assert_eq!(source.last_error(), None);

    let (seen, make) = recorder();
    source.when_ready(make());
    assert_eq!(*seen.lock().unwrap(), vec![true]);
}

#[tokio::test]
async fn failed_source_stays_empty_even_if_the_repository_recovers() {
    let repo = Arc::new(FakeRepository::with_fetch_failures(three_songs(), |n| n == 0));
    let source = MusicSource::new(repo.clone());

    source.load().await;
    source.load().await;

    assert_eq!(repo.fetches(), 1);
    assert_eq!(source.readiness(), Readiness::Error);
    assert!(source.is_empty());
    assert!(source.last_error().is_some());
}

#[test]
fn racing_registrations_and_completion_run_every_callback_once() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    use howl::source::ReadinessGate;

    for _ in 0..100 {
        let gate = Arc::new(ReadinessGate::new());
        gate.transition(Readiness::Initializing);
        let calls = Arc::new(AtomicUsize::new(0));
        let start = Arc::new(Barrier::new(9));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let gate = Arc::clone(&gate);
            let calls = Arc::clone(&calls);
            let start = Arc::clone(&start);
            handles.push(thread::spawn(move || {
                start.wait();
                for _ in 0..50 {
                    let calls = Arc::clone(&calls);
                    gate.when_ready(move |ok| {
                        assert!(ok);
                        calls.fetch_add(1, Ordering::SeqCst);
                    });
                }
            }));
        }

        let finisher = {
            let gate = Arc::clone(&gate);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                gate.transition(Readiness::Initialized);
            })
        };

        for handle in handles {
            handle.join().unwrap();
        }
        finisher.join().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 400);
        assert_eq!(gate.pending_callbacks(), 0);
    }
}

//! ---
//! fc_section: "04-catalog"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Standard-library feature cases."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
//! Library half of the tour: ownership helpers, threads, reference counting,
//! durations, tuples, containers, atomics and deferred results.

use std::any::TypeId;
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use featcheck_harness::{Category, ExampleCase};

/// Library cases in tour order.
pub fn cases() -> Vec<ExampleCase> {
    [
        std_move_unique(),
        std_forward(),
        std_thread(),
        std_to_string(),
        type_traits(),
        shared_pointers(),
        weak_pointers(),
        chrono_durations(),
        tuples(),
        tie_unpacking(),
        std_array_sort(),
        unordered_containers(),
        make_shared(),
        atomics_memory_model(),
        async_future(),
    ]
    .into_iter()
    .map(|case| case.in_category(Category::Library))
    .collect()
}

/// Join a worker, turning its panic into an error carrying the thread name.
fn join<T>(handle: thread::JoinHandle<T>, label: &str) -> anyhow::Result<T> {
    handle
        .join()
        .map_err(|_| anyhow!("worker `{label}` panicked"))
}

fn std_move_unique() -> ExampleCase {
    ExampleCase::expect_eq(
        "std_move_unique",
        "taking an owned slot transfers its value and leaves the slot empty",
        (true, 0, 1),
        || {
            let mut p1: Option<Box<i32>> = Some(Box::new(1));
            let p2 = p1.take();
            let emptied = p1.is_none();
            let remaining = p1.map_or(0, |value| *value);
            Ok((emptied, remaining, p2.map_or(0, |value| *value)))
        },
    )
}

#[derive(Debug, PartialEq)]
struct Made(&'static str);

struct Source;

impl From<Source> for Made {
    fn from(_: Source) -> Self {
        Made("moved")
    }
}

impl From<&Source> for Made {
    fn from(_: &Source) -> Self {
        Made("copied")
    }
}

fn wrapper<T: Into<Made>>(arg: T) -> Made {
    arg.into()
}

fn std_forward() -> ExampleCase {
    ExampleCase::expect_eq(
        "std_forward",
        "a generic wrapper preserves whether its argument was owned or borrowed",
        vec![Made("moved"), Made("copied"), Made("moved")],
        || {
            let source = Source;
            Ok(vec![
                wrapper(Source),
                wrapper(&source),
                wrapper(source),
            ])
        },
    )
}

fn std_thread() -> ExampleCase {
    ExampleCase::expect_eq(
        "std_thread",
        "spawned threads run closures and are joined for their results",
        30,
        || {
            let handles: Vec<_> = (1..=4_u64)
                .map(|n| thread::spawn(move || n * n))
                .collect();
            let mut total = 0;
            for (index, handle) in handles.into_iter().enumerate() {
                total += join(handle, &format!("square-{index}"))?;
            }
            Ok(total)
        },
    )
}

fn std_to_string() -> ExampleCase {
    ExampleCase::expect_eq(
        "std_to_string",
        "numbers render to their shortest decimal text",
        ("1.2".to_owned(), "123".to_owned()),
        || Ok((1.2_f64.to_string(), 123.to_string())),
    )
}

fn is_integral<T: 'static>() -> bool {
    [
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
    ]
    .contains(&TypeId::of::<T>())
}

struct If<const COND: bool>;

trait Conditional<T, F> {
    type Type: 'static;
}

impl<T: 'static, F> Conditional<T, F> for If<true> {
    type Type = T;
}

impl<T, F: 'static> Conditional<T, F> for If<false> {
    type Type = F;
}

type Select<const COND: bool, T, F> = <If<COND> as Conditional<T, F>>::Type;

fn type_traits() -> ExampleCase {
    ExampleCase::expect_eq(
        "type_traits",
        "type-level predicates and conditional type selection",
        (true, false, true, true),
        || {
            Ok((
                is_integral::<i32>(),
                is_integral::<f64>(),
                TypeId::of::<Select<true, i32, f64>>() == TypeId::of::<i32>(),
                TypeId::of::<Select<false, i32, f64>>() == TypeId::of::<f64>(),
            ))
        },
    )
}

fn shared_pointers() -> ExampleCase {
    ExampleCase::expect_eq(
        "shared_pointers",
        "reference counts track every live shared handle",
        (1, 3, 1, 42),
        || {
            let p1 = Rc::new(42);
            let alone = Rc::strong_count(&p1);
            let p2 = Rc::clone(&p1);
            let p3 = Rc::clone(&p1);
            let together = Rc::strong_count(&p1);
            drop(p2);
            drop(p3);
            Ok((alone, together, Rc::strong_count(&p1), *p1))
        },
    )
}

fn weak_pointers() -> ExampleCase {
    ExampleCase::expect_eq(
        "weak_pointers",
        "a weak handle upgrades while the value lives and fails after it is dropped",
        (true, false),
        || {
            let strong = Rc::new("shared".to_owned());
            let weak: Weak<String> = Rc::downgrade(&strong);
            let alive = weak.upgrade().is_some();
            drop(strong);
            Ok((alive, weak.upgrade().is_some()))
        },
    )
}

fn chrono_durations() -> ExampleCase {
    ExampleCase::expect_eq(
        "chrono_durations",
        "durations convert between units and measure elapsed time",
        (1.5, true, 1500),
        || {
            let span = Duration::from_millis(1500);
            let start = std::time::Instant::now();
            thread::sleep(Duration::from_millis(1));
            let elapsed = start.elapsed();
            Ok((
                span.as_secs_f64(),
                elapsed >= Duration::from_millis(1),
                span.as_millis(),
            ))
        },
    )
}

fn tuples() -> ExampleCase {
    ExampleCase::expect_eq(
        "tuples",
        "heterogeneous fixed-size records are accessed by position",
        (51, "Frans Nielsen", "NYI"),
        || {
            let player_profile = (51, "Frans Nielsen", "NYI");
            Ok((player_profile.0, player_profile.1, player_profile.2))
        },
    )
}

fn tie_unpacking() -> ExampleCase {
    ExampleCase::expect_eq(
        "tie_unpacking",
        "destructuring assigns chosen tuple elements and ignores the rest",
        ("John Tavares", "yes", "no"),
        || {
            let player_name;
            (_, player_name, _) = (91, "John Tavares", "NYI");
            let yes;
            let no;
            (yes, no) = ("yes", "no");
            Ok((player_name, yes, no))
        },
    )
}

fn std_array_sort() -> ExampleCase {
    ExampleCase::expect_eq(
        "std_array_sort",
        "fixed-size arrays sort in place and map element-wise",
        ([1, 2, 3], [2, 4, 6]),
        || {
            let mut a = [2, 1, 3];
            a.sort_unstable();
            Ok((a, a.map(|x| x * 2)))
        },
    )
}

fn unordered_containers() -> ExampleCase {
    ExampleCase::expect_eq(
        "unordered_containers",
        "hash sets deduplicate and hash maps look up by key",
        (3, 2, true),
        || {
            let set: HashSet<i32> = [1, 2, 3, 3, 1].into_iter().collect();
            let map: HashMap<&str, i32> = [("one", 1), ("two", 2)].into_iter().collect();
            let two = map.get("two").copied().context("key `two` missing")?;
            Ok((set.len(), two, map.contains_key("one")))
        },
    )
}

fn make_shared() -> ExampleCase {
    ExampleCase::expect_eq(
        "make_shared",
        "one atomically counted allocation is shared across threads",
        (vec![6, 6, 6], 1),
        || {
            let shared = Arc::new(vec![1, 2, 3]);
            let handles: Vec<_> = (0..3)
                .map(|_| {
                    let local = Arc::clone(&shared);
                    thread::spawn(move || local.iter().sum::<i32>())
                })
                .collect();
            let mut sums = Vec::with_capacity(handles.len());
            for handle in handles {
                sums.push(join(handle, "shared-sum")?);
            }
            Ok((sums, Arc::strong_count(&shared)))
        },
    )
}

fn atomics_memory_model() -> ExampleCase {
    ExampleCase::expect_eq(
        "atomics_memory_model",
        "atomic increments from many threads are never lost, release/acquire publishes data",
        (4000, true),
        || {
            let counter = AtomicUsize::new(0);
            thread::scope(|scope| {
                for _ in 0..4 {
                    scope.spawn(|| {
                        for _ in 0..1000 {
                            counter.fetch_add(1, Ordering::Relaxed);
                        }
                    });
                }
            });

            let payload = AtomicUsize::new(0);
            let ready = std::sync::atomic::AtomicBool::new(false);
            let observed = thread::scope(|scope| {
                scope.spawn(|| {
                    payload.store(42, Ordering::Relaxed);
                    ready.store(true, Ordering::Release);
                });
                let reader = scope.spawn(|| {
                    while !ready.load(Ordering::Acquire) {
                        std::hint::spin_loop();
                    }
                    payload.load(Ordering::Relaxed)
                });
                reader.join()
            })
            .map_err(|_| anyhow!("acquire reader panicked"))?;

            Ok((counter.load(Ordering::SeqCst), observed == 42))
        },
    )
}

fn async_future() -> ExampleCase {
    ExampleCase::expect_eq(
        "async_future",
        "results are delivered through a channel, a joined thread, or lazily on first access",
        (1000, 1000, 1000),
        || {
            let (promise, future) = mpsc::channel();
            let producer = thread::spawn(move || promise.send(1000));
            let received = future
                .recv_timeout(Duration::from_secs(1))
                .context("promise was never fulfilled")?;
            join(producer, "promise")?.context("future dropped before the value arrived")?;

            let task = thread::spawn(|| 1000);
            let joined = join(task, "task")?;

            let deferred: OnceCell<i32> = OnceCell::new();
            let lazy = *deferred.get_or_init(|| 1000);

            Ok((received, joined, lazy))
        },
    )
}

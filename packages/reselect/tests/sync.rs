use reselect::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

struct Inventory {
    stock: Arc<[u32]>,
    reserved: u32,
}

fn assert_send_sync<T: Send + Sync>(_: &T) {}

#[test]
fn sync_selectors_are_shared_between_threads() {
    let calls = AtomicUsize::new(0);
    let creator = SelectorCreator::new().sync();
    let available = creator.create(
        (
            |inventory: &Inventory| inventory.stock.clone(),
            |inventory: &Inventory| inventory.reserved,
        ),
        |stock: &Arc<[u32]>, reserved: &u32| {
            calls.fetch_add(1, Ordering::SeqCst);
            stock.iter().sum::<u32>() - reserved
        },
    );
    assert_send_sync(&available);

    let inventory = Inventory {
        stock: Arc::from([4, 5, 6]),
        reserved: 3,
    };

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(available.select(&inventory, &()), 12);
                }
            });
        }
    });

    // The slot stays locked while computing, so concurrent misses on the same
    // arguments are serialized and only the first one computes.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(available.recomputations(), 1);
}

#[test]
fn shared_selectors_compose_through_arc() {
    let creator = SelectorCreator::new().sync();
    let total = Arc::new(creator.create(
        (|inventory: &Inventory| inventory.stock.clone(),),
        |stock: &Arc<[u32]>| stock.iter().sum::<u32>(),
    ));
    let free = creator.create(
        (total.clone(), |inventory: &Inventory| inventory.reserved),
        |total: &u32, reserved: &u32| total.saturating_sub(*reserved),
    );

    let inventory = Inventory {
        stock: Arc::from([1, 2]),
        reserved: 1,
    };

    let handle = {
        let total = total.clone();
        std::thread::spawn(move || {
            let inventory = Inventory {
                stock: Arc::from([10]),
                reserved: 0,
            };
            total.select(&inventory, &())
        })
    };
    assert_eq!(handle.join().unwrap(), 10);

    assert_eq!(free.select(&inventory, &()), 2);
    assert_eq!(total.recomputations(), 2);
}

use pretty_assertions::assert_eq;
use reselect::*;
use std::{
    cell::{Cell, RefCell},
    panic::AssertUnwindSafe,
    rc::Rc,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Item {
    name: &'static str,
    price: f64,
}

struct Shop {
    tax_percent: f64,
    items: Rc<Vec<Item>>,
}

struct State {
    shop: Shop,
}

struct Props {
    discount_percent: f64,
}

#[test]
fn shop_total() {
    init_tracing();

    let state = State {
        shop: Shop {
            tax_percent: 8.0,
            items: Rc::new(vec![
                Item {
                    name: "apple",
                    price: 1.2,
                },
                Item {
                    name: "orange",
                    price: 0.95,
                },
            ]),
        },
    };

    let subtotal = create_selector(
        (|state: &State| state.shop.items.clone(),),
        |items: &Rc<Vec<Item>>| items.iter().map(|item| item.price).sum::<f64>(),
    )
    .with_name("subtotal");
    let total = create_selector(
        (
            &subtotal,
            |state: &State| state.shop.tax_percent,
            |_: &State, props: &Props| props.discount_percent,
        ),
        |subtotal: &f64, tax: &f64, discount: &f64| {
            subtotal * (1.0 - discount / 100.0) * (1.0 + tax / 100.0)
        },
    )
    .with_name("total");

    let props = Props {
        discount_percent: 10.0,
    };
    let first = total.select(&state, &props);
    assert!((first - 2.15 * 0.9 * 1.08).abs() < 1e-12);

    assert_eq!(total.select(&state, &props), first);
    assert_eq!(subtotal.recomputations(), 1);
    assert_eq!(total.recomputations(), 1);
    assert_eq!(state.shop.items[0].name, "apple");
}

#[derive(Clone)]
struct Todos {
    items: Vec<&'static str>,
    filter: &'static str,
}

#[test]
fn recomputes_only_when_a_selected_value_changes() {
    let count = create_selector(
        (|todos: &Todos| todos.items.len(),),
        |len: &usize| format!("{len} todos"),
    );

    let todos = Todos {
        items: vec!["write", "test"],
        filter: "all",
    };
    assert_eq!(count.select(&todos, &()), "2 todos");

    // A deep copy selects the same length.
    let mut copy = todos.clone();
    copy.filter = "done";
    assert_eq!(count.select(&copy, &()), "2 todos");
    assert_eq!(count.recomputations(), 1);

    copy.items.push("ship");
    assert_eq!(count.select(&copy, &()), "3 todos");
    assert_eq!(count.recomputations(), 2);
}

struct Cart {
    prices: Rc<Vec<u32>>,
    coupon: u32,
}

#[test]
fn composed_selectors_receive_derived_values() {
    let received = RefCell::new(Vec::new());

    let sum = create_selector((|cart: &Cart| cart.prices.clone(),), |prices: &Rc<Vec<u32>>| {
        prices.iter().sum::<u32>()
    });
    let discounted = create_selector((&sum, |cart: &Cart| cart.coupon), |sum: &u32, coupon: &u32| {
        received.borrow_mut().push(*sum);
        sum.saturating_sub(*coupon)
    });

    let cart = Cart {
        prices: Rc::new(vec![10, 20, 30]),
        coupon: 5,
    };
    assert_eq!(discounted.select(&cart, &()), 55);
    assert_eq!(*received.borrow(), [60]);

    // Same contents in a new allocation: the sum recomputes to the same value, the
    // discount does not.
    let refilled = Cart {
        prices: Rc::new(vec![10, 20, 30]),
        coupon: 5,
    };
    assert_eq!(discounted.select(&refilled, &()), 55);
    assert_eq!(sum.recomputations(), 2);
    assert_eq!(discounted.recomputations(), 1);
}

#[test]
fn props_take_part_in_the_comparison() {
    let nth = create_selector(
        (
            |todos: &Todos| todos.items.len(),
            |_: &Todos, index: &usize| *index,
        ),
        |len: &usize, index: &usize| index < len,
    );

    let todos = Todos {
        items: vec!["a", "b"],
        filter: "all",
    };
    assert!(nth.select(&todos, &1));
    assert!(nth.select(&todos, &1));
    assert_eq!(nth.recomputations(), 1);

    assert!(!nth.select(&todos, &2));
    assert_eq!(nth.recomputations(), 2);
    assert_eq!(todos.filter, "all");
}

#[test]
fn list_inputs_reach_the_combiner_in_order() {
    let cart = Cart {
        prices: Rc::new(vec![3, 4]),
        coupon: 1,
    };

    let digits = create_selector_from_list(
        vec![
            boxed(|cart: &Cart| cart.coupon),
            boxed(|cart: &Cart| cart.prices[0]),
            boxed(|cart: &Cart| cart.prices[1]),
        ],
        |values: &[u32]| values.iter().fold(0u32, |acc, digit| acc * 10 + digit),
    )
    .unwrap();

    assert_eq!(digits.select(&cart, &()), 134);
    assert_eq!(digits.select(&cart, &()), 134);
    assert_eq!(digits.recomputations(), 1);
    assert_eq!(Inputs::<Cart, ()>::count(digits.inputs()), 3);
}

#[test]
fn empty_input_list_is_rejected() {
    let result = create_selector_from_list(
        Vec::<BoxedSelector<Cart, (), u32>>::new(),
        |values: &[u32]| values.len(),
    );
    let Err(error) = result else {
        panic!("a selector without inputs was created");
    };
    assert_eq!(error, ConfigError::NoInputSelectors);
    assert_eq!(error.to_string(), "a selector needs at least one input selector");
}

#[test]
fn panics_leave_the_cache_untouched() {
    let half = create_selector((|value: &i32| *value,), |value: &i32| {
        assert!(*value % 2 == 0, "odd value");
        value / 2
    });

    assert_eq!(half.select(&4, &()), 2);
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| half.select(&3, &())));
    assert!(outcome.is_err());

    assert_eq!(half.last_result(), Some(2));
    assert_eq!(half.select(&4, &()), 2);
    assert_eq!(half.recomputations(), 2);
}

#[test]
fn errors_are_returned_but_not_cached() {
    let parse = create_try_selector((|text: &String| text.clone(),), |text: &String| {
        text.parse::<i32>()
    });

    assert_eq!(parse.select(&"12".to_string(), &()), Ok(12));
    assert!(parse.select(&"twelve".to_string(), &()).is_err());
    assert_eq!(parse.last_result(), Some(12));

    assert_eq!(parse.select(&"12".to_string(), &()), Ok(12));
    assert_eq!(parse.recomputations(), 2);
}

#[test]
fn selectors_expose_their_parts() {
    let calls = Cell::new(0);
    let label = create_selector((|todos: &Todos| todos.filter,), |filter: &&'static str| {
        calls.set(calls.get() + 1);
        filter.to_uppercase()
    })
    .with_name("label");

    assert_eq!(label.name(), Some("label"));
    assert_eq!(label.created_at().file(), file!());
    assert_eq!(label.info().to_string(), format!("label (created at {})", label.created_at()));
    assert_eq!(label.last_result(), None);

    let todos = Todos {
        items: vec![],
        filter: "done",
    };
    assert_eq!(label.inputs().select_all(&todos, &()), ("done",));
    assert_eq!((label.combiner())(&"all"), "ALL");
    assert_eq!(label.recomputations(), 0);

    label.select(&todos, &());
    label.clear_cache();
    label.select(&todos, &());
    assert_eq!(label.recomputations(), 2);
    assert_eq!(calls.get(), 3);
}

#[test]
fn creators_share_an_equality_policy() {
    let by_first_letter = SelectorCreator::new()
        .equality_fn(|a: &String, b: &String| a.chars().next() == b.chars().next());
    let greeting = by_first_letter.create((|name: &String| name.clone(),), |name: &String| {
        format!("hello {name}")
    });

    assert_eq!(greeting.select(&"ada".to_string(), &()), "hello ada");
    assert_eq!(greeting.select(&"alan".to_string(), &()), "hello ada");
    assert_eq!(greeting.select(&"grace".to_string(), &()), "hello grace");
    assert_eq!(greeting.recomputations(), 2);
}

//! Integration tests for the order ledger
//!
//! Covers the order lifecycle and its effect on train inventory

mod common;

use common::{TestContext, TestOrderBuilder};
use railbook::error::BookingError;
use railbook::models::{OrderStatus, SeatClass};

#[test]
fn test_create_order_is_unpaid() {
    let ctx = TestContext::new_in_memory().unwrap();
    let order = TestOrderBuilder::new().create(&ctx.client).unwrap();

    assert!(order.id.starts_with("o_"));
    assert_eq!(order.status, OrderStatus::Unpaid);
    assert_eq!(ctx.client.orders().get(&order.id).unwrap(), Some(order));
}

#[test]
fn test_pay_second_class_two_passengers() {
    let ctx = TestContext::new_in_memory().unwrap();
    assert_eq!(ctx.remaining("t_g101", SeatClass::SecondClass), 64);

    let order = TestOrderBuilder::new()
        .seat_class(SeatClass::SecondClass)
        .passengers(vec!["p_a".to_string(), "p_b".to_string()])
        .total_price(1106)
        .create(&ctx.client)
        .unwrap();

    let paid = ctx.client.orders().pay(&order.id).unwrap();

    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(paid.status.to_string(), "已支付");
    assert_eq!(ctx.remaining("t_g101", SeatClass::SecondClass), 62);
    // other classes untouched
    assert_eq!(ctx.remaining("t_g101", SeatClass::FirstClass), 21);
}

#[test]
fn test_pay_nonexistent_order_fails() {
    let ctx = TestContext::new_in_memory().unwrap();
    let err = ctx.client.orders().pay("o_does_not_exist").unwrap_err();

    assert!(matches!(err, BookingError::OrderNotFound));
    assert_eq!(err.to_string(), "订单不存在");
}

#[test]
fn test_pay_unknown_seat_class_leaves_order_unpaid() {
    let ctx = TestContext::new_in_memory().unwrap();
    let order = TestOrderBuilder::new()
        .train("t_z19", "Z19")
        .seat_class(SeatClass::Business)
        .create(&ctx.client)
        .unwrap();

    let result = ctx.client.orders().pay(&order.id);
    assert!(matches!(result, Err(BookingError::SeatClassNotFound)));

    let stored = ctx.client.orders().get(&order.id).unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Unpaid);
}

#[test]
fn test_refund_unpaid_order_fails() {
    let ctx = TestContext::new_in_memory().unwrap();
    let order = TestOrderBuilder::new().create(&ctx.client).unwrap();

    let err = ctx.client.orders().refund(&order.id).unwrap_err();
    assert!(matches!(err, BookingError::OrderNotPaid));
    assert_eq!(err.to_string(), "仅已支付订单可退票");
    assert_eq!(ctx.remaining("t_g101", SeatClass::SecondClass), 64);
}

#[test]
fn test_refund_paid_order_restores_seats() {
    let ctx = TestContext::new_in_memory().unwrap();
    let order = TestOrderBuilder::new()
        .passengers(vec!["p_a".to_string(), "p_b".to_string(), "p_c".to_string()])
        .create(&ctx.client)
        .unwrap();

    ctx.client.orders().pay(&order.id).unwrap();
    assert_eq!(ctx.remaining("t_g101", SeatClass::SecondClass), 61);

    let refunded = ctx.client.orders().refund(&order.id).unwrap();
    assert_eq!(refunded.status, OrderStatus::Canceled);
    assert_eq!(ctx.remaining("t_g101", SeatClass::SecondClass), 64);

    // a canceled order cannot be refunded again
    assert!(matches!(
        ctx.client.orders().refund(&order.id),
        Err(BookingError::OrderNotPaid)
    ));
}

#[test]
fn test_cancel_unpaid_order() {
    let ctx = TestContext::new_in_memory().unwrap();
    let order = TestOrderBuilder::new().create(&ctx.client).unwrap();

    let canceled = ctx.client.orders().cancel(&order.id).unwrap();
    assert_eq!(canceled.status, OrderStatus::Canceled);
    assert!(matches!(
        ctx.client.orders().cancel("o_missing"),
        Err(BookingError::OrderNotFound)
    ));
}

#[test]
fn test_reschedule_creates_one_unpaid_order() {
    let ctx = TestContext::new_in_memory().unwrap();
    let passengers = vec!["p_a".to_string(), "p_b".to_string()];
    let order = TestOrderBuilder::new()
        .passengers(passengers.clone())
        .total_price(1106)
        .create(&ctx.client)
        .unwrap();
    ctx.client.orders().pay(&order.id).unwrap();

    let replacement = ctx.client.orders().reschedule(&order.id, "t_z19").unwrap();

    assert_ne!(replacement.id, order.id);
    assert_eq!(replacement.status, OrderStatus::Unpaid);
    assert_eq!(replacement.train_id, "t_z19");
    assert_eq!(replacement.train_no, "Z19");
    assert_eq!(replacement.seat_class, SeatClass::SecondClass);
    assert_eq!(replacement.passenger_ids, passengers);
    assert_eq!(replacement.total_price, 1106);

    let original = ctx.client.orders().get(&order.id).unwrap().unwrap();
    assert_eq!(original.status, OrderStatus::Canceled);
    assert_eq!(ctx.remaining("t_g101", SeatClass::SecondClass), 64);

    let all = ctx.client.orders().list().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(
        all.iter().filter(|o| o.status == OrderStatus::Unpaid).count(),
        1
    );
}

#[test]
fn test_reschedule_requires_paid_and_known_target() {
    let ctx = TestContext::new_in_memory().unwrap();
    let order = TestOrderBuilder::new().create(&ctx.client).unwrap();

    assert!(matches!(
        ctx.client.orders().reschedule(&order.id, "t_z19"),
        Err(BookingError::OrderNotPaid)
    ));

    ctx.client.orders().pay(&order.id).unwrap();
    assert!(matches!(
        ctx.client.orders().reschedule(&order.id, "t_unknown"),
        Err(BookingError::TrainNotFound)
    ));

    // failed reschedule leaves the order paid
    let stored = ctx.client.orders().get(&order.id).unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Paid);
    assert_eq!(ctx.client.orders().list().unwrap().len(), 1);
}

#[test]
fn test_oversold_inventory_goes_negative() {
    let ctx = TestContext::new_in_memory().unwrap();
    let order = TestOrderBuilder::new()
        .seat_class(SeatClass::Standing)
        .create(&ctx.client)
        .unwrap();

    ctx.client.orders().pay(&order.id).unwrap();
    assert_eq!(ctx.remaining("t_g101", SeatClass::Standing), -1);
}

#[test]
fn test_list_orders_newest_first() {
    let ctx = TestContext::new_in_memory().unwrap();
    let first = TestOrderBuilder::new().create(&ctx.client).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = TestOrderBuilder::new().create(&ctx.client).unwrap();

    let ids: Vec<String> = ctx
        .client
        .orders()
        .list()
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn test_book_through_registry() {
    let ctx = TestContext::new_in_memory().unwrap();
    let passengers = ctx.add_passengers(3).unwrap();

    let order = ctx
        .client
        .orders()
        .book("t_g101", SeatClass::Business, passengers)
        .unwrap();
    assert_eq!(order.total_price, 1748 * 3);

    ctx.client.orders().pay(&order.id).unwrap();
    assert_eq!(ctx.remaining("t_g101", SeatClass::Business), 2);
}

#[test]
fn test_inventory_persists_in_file_store() {
    let ctx = TestContext::new_with_file_storage().unwrap();
    let db_path = ctx.temp_dir.path().join("test_railbook.db");
    let order = TestOrderBuilder::new().create(&ctx.client).unwrap();
    ctx.client.orders().pay(&order.id).unwrap();

    let reopened =
        railbook::BookingClient::new_with_storage_path(&db_path, railbook::SessionConfig::default())
            .unwrap();
    let train = reopened.trains().get("t_g101").unwrap().unwrap();
    assert_eq!(train.seat(SeatClass::SecondClass).unwrap().remaining, 63);
    assert_eq!(
        reopened.orders().get(&order.id).unwrap().unwrap().status,
        OrderStatus::Paid
    );
}

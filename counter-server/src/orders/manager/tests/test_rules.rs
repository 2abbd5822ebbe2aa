use super::*;
use crate::orders::status::OrderAction;

#[tokio::test]
async fn test_approve_requires_pending_payment() {
    let f = create_test_manager();
    let pie = f.add_stock("Pie", 5.0, 10).await;
    let placed = f.place("Ana", &[(pie, 1)], "cash").await;

    let err = f.manager.approve_payment(placed.order_id).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Preparing,
            action: OrderAction::ApprovePayment,
        }
    );
}

#[tokio::test]
async fn test_reject_twice_restores_once() {
    let f = create_test_manager();
    let pie = f.add_stock("Pie", 5.0, 10).await;
    let placed = f.place("Ana", &[(pie, 4)], "pix").await;

    f.manager.reject_payment(placed.order_id).await.unwrap();
    let err = f.manager.reject_payment(placed.order_id).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Rejected,
            ..
        }
    ));
    assert_eq!(f.stock_quantity(pie).await, 10);
}

#[tokio::test]
async fn test_terminal_orders_refuse_every_action() {
    let f = create_test_manager();
    let pie = f.add_stock("Pie", 5.0, 10).await;
    let placed = f.place("Ana", &[(pie, 1)], "cash").await;
    f.manager.mark_ready(placed.order_id).await.unwrap();
    f.manager.call_next().await.unwrap();

    let id = placed.order_id;
    assert!(f.manager.approve_payment(id).await.is_err());
    assert!(f.manager.reject_payment(id).await.is_err());
    assert!(f.manager.mark_ready(id).await.is_err());
    assert_eq!(
        f.manager.order_status(id).await.unwrap(),
        OrderStatus::Completed
    );
}

#[tokio::test]
async fn test_unknown_order() {
    let f = create_test_manager();
    assert_eq!(
        f.manager.approve_payment(42).await,
        Err(OrderError::OrderNotFound(42))
    );
    assert_eq!(
        f.manager.reject_payment(42).await,
        Err(OrderError::OrderNotFound(42))
    );
    assert_eq!(
        f.manager.mark_ready(42).await,
        Err(OrderError::OrderNotFound(42))
    );
    assert_eq!(
        f.manager.order_status(42).await,
        Err(OrderError::OrderNotFound(42))
    );
}

#[tokio::test]
async fn test_stock_failures_keep_stock_and_numbers() {
    let f = create_test_manager();
    let pie = f.add_stock("Pie", 5.0, 2).await;

    let err = f
        .manager
        .create_order(order_cmd("Ana", &[(pie, 3)], "cash"))
        .await
        .unwrap_err();
    match err {
        OrderError::InsufficientStock(shortfalls) => {
            assert_eq!(shortfalls[0].requested, 3);
            assert_eq!(shortfalls[0].available, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = f
        .manager
        .create_order(order_cmd("Ana", &[(99, 1)], "cash"))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::StockItemNotFound(99));

    assert_eq!(f.stock_quantity(pie).await, 2);
    assert_eq!(f.place("Ana", &[(pie, 2)], "cash").await.order_number, "001");
}

#[test]
fn test_errors_map_to_http_codes() {
    use http::StatusCode;
    let cases = [
        (OrderError::Validation("x".into()), StatusCode::BAD_REQUEST),
        (OrderError::OrderNotFound(1), StatusCode::NOT_FOUND),
        (OrderError::StockItemNotFound(1), StatusCode::NOT_FOUND),
        (OrderError::InsufficientStock(vec![]), StatusCode::CONFLICT),
        (
            OrderError::InvalidTransition {
                from: OrderStatus::Ready,
                action: OrderAction::ApprovePayment,
            },
            StatusCode::CONFLICT,
        ),
        (OrderError::NoneReady, StatusCode::NOT_FOUND),
        (OrderError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, status) in cases {
        let app: shared::AppError = err.into();
        assert_eq!(app.http_status(), status);
    }
}

#[test]
fn test_stock_not_found_detail_carries_item_id() {
    let app: shared::AppError = OrderError::StockItemNotFound(7).into();
    let details = app.details.unwrap();
    assert_eq!(details["item_id"], serde_json::json!(7));
}

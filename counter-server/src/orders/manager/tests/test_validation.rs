use super::*;

async fn rejects(cmd: OrderCreate) {
    let f = create_test_manager();
    let result = f.manager.create_order(cmd).await;
    assert!(
        matches!(result, Err(OrderError::Validation(_))),
        "expected validation error, got {result:?}"
    );
}

#[tokio::test]
async fn test_missing_fields() {
    let base = order_cmd("Ana", &[(1, 1)], "cash");

    rejects(OrderCreate {
        customer_name: None,
        ..base.clone()
    })
    .await;
    rejects(OrderCreate {
        customer_name: Some("   ".into()),
        ..base.clone()
    })
    .await;
    rejects(OrderCreate {
        items: None,
        ..base.clone()
    })
    .await;
    rejects(OrderCreate {
        items: Some(vec![]),
        ..base.clone()
    })
    .await;
    rejects(OrderCreate {
        total: None,
        ..base.clone()
    })
    .await;
    rejects(OrderCreate {
        payment_method: Some(String::new()),
        ..base
    })
    .await;
}

#[tokio::test]
async fn test_bad_numbers() {
    rejects(order_cmd("Ana", &[(1, 0)], "cash")).await;
    rejects(order_cmd("Ana", &[(1, -2)], "cash")).await;
    rejects(OrderCreate {
        total: Some(-1.0),
        ..order_cmd("Ana", &[(1, 1)], "cash")
    })
    .await;
}

#[tokio::test]
async fn test_zero_total_is_allowed() {
    let f = create_test_manager();
    let gift = f.add_stock("Gift", 0.0, 1).await;
    let placed = f
        .manager
        .create_order(OrderCreate {
            total: Some(0.0),
            ..order_cmd("Ana", &[(gift, 1)], "cash")
        })
        .await
        .unwrap();
    assert_eq!(placed.order_number, "001");
}

#[tokio::test]
async fn test_input_is_trimmed() {
    let f = create_test_manager();
    let pie = f.add_stock("Pie", 5.0, 1).await;
    let placed = f
        .manager
        .create_order(OrderCreate {
            customer_name: Some("  Ana ".into()),
            phone: Some(" ".into()),
            ..order_cmd("", &[(pie, 1)], " pix ")
        })
        .await
        .unwrap();
    assert_eq!(placed.status, OrderStatus::PendingPayment);

    let order = f.manager.get_order(placed.order_id).await.unwrap();
    assert_eq!(order.customer_name, "Ana");
    assert_eq!(order.phone, None);
    assert_eq!(order.payment_method, "pix");
}

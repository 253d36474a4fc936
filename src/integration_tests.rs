#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, oid::ObjectId};
    use rust_decimal::Decimal;

    use crate::catalog::ProductError;
    use crate::clients::{OrderClient, ProductClient};
    use crate::domain::{OrderCreate, OrderItem, ProductCreate, ProductQuery};
    use crate::mock_framework::{create_mock_store, expect_find, expect_find_one, expect_insert};
    use crate::orders::OrderError;
    use crate::store::{Filter, StoreError};

    #[tokio::test]
    async fn test_order_creation_flow() {
        // 1. Setup Mocks
        let (store, mut store_rx) = create_mock_store(10);
        let order_client = OrderClient::new(store);

        // 2. Execute Order Creation in background
        let order_task = tokio::spawn(async move {
            let mut order = OrderCreate::new(vec![
                OrderItem::new(Decimal::new(1000, 2), 2).for_product("product_1"),
                OrderItem::new(Decimal::new(500, 2), 1),
            ])
            .with_shipping(Decimal::new(300, 2));
            order.extra.insert("total".to_string(), 1.into());
            order.extra.insert("subtotal".to_string(), 1.into());
            order.extra.insert("customer".to_string(), "alice".into());
            order_client.create_order(order).await
        });

        // 3. Verify Interactions

        // Expect Order Insert with server-side totals
        let (collection, document, responder) =
            expect_insert(&mut store_rx).await.expect("Expected Order Insert");
        assert_eq!(collection, "order");
        assert_eq!(document.get_f64("subtotal").unwrap(), 25.0);
        assert_eq!(document.get_f64("shipping").unwrap(), 3.0);
        assert_eq!(document.get_f64("total").unwrap(), 28.0);
        assert_eq!(document.get_str("customer").unwrap(), "alice");
        assert!(!document.contains_key("_id"));

        let items = document.get_array("items").unwrap();
        assert_eq!(items.len(), 2);
        let first = items[0].as_document().unwrap();
        assert_eq!(first.get_str("product_id").unwrap(), "product_1");
        assert_eq!(first.get_i64("quantity").unwrap(), 2);

        let id = ObjectId::new();
        responder.send(Ok(id)).unwrap();

        // 4. Verify Result
        let placed = order_task.await.unwrap().unwrap();
        assert_eq!(placed.id, id.to_hex());
        assert_eq!(placed.subtotal, Decimal::new(25, 0));
        assert_eq!(placed.total, Decimal::new(28, 0));
    }

    #[tokio::test]
    async fn test_invalid_order_never_reaches_store() {
        let (store, mut store_rx) = create_mock_store(10);
        let order_client = OrderClient::new(store);

        let order = OrderCreate::new(vec![OrderItem::new(Decimal::ONE, 0)]);
        let result = order_client.create_order(order).await;

        assert!(matches!(result, Err(OrderError::ValidationError(_))));
        drop(order_client);
        assert!(store_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_order_store_failure_surfaces_as_database_error() {
        let (store, mut store_rx) = create_mock_store(10);
        let order_client = OrderClient::new(store);

        let order_task = tokio::spawn(async move {
            order_client
                .create_order(OrderCreate::new(vec![OrderItem::new(Decimal::ONE, 1)]))
                .await
        });

        let (_, _, responder) = expect_insert(&mut store_rx).await.expect("Expected Order Insert");
        responder
            .send(Err(StoreError::QueryError("write concern failed".to_string())))
            .unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(
            result,
            Err(OrderError::DatabaseError("Store query error: write concern failed".to_string()))
        );
    }

    #[tokio::test]
    async fn test_product_listing_flow() {
        let (store, mut store_rx) = create_mock_store(10);
        let product_client = ProductClient::new(store);

        let list_task = tokio::spawn(async move {
            let query = ProductQuery {
                category: Some("kitchen".to_string()),
                q: Some("mug".to_string()),
                limit: 5,
            };
            product_client.list_products(query).await
        });

        let (collection, filter, limit, responder) =
            expect_find(&mut store_rx).await.expect("Expected Product Find");
        assert_eq!(collection, "product");
        assert_eq!(limit, 5);
        assert_eq!(
            filter,
            Filter::And(vec![
                Filter::equals("category", "kitchen"),
                Filter::AnyOf(vec![
                    Filter::contains_ignore_case("title", "mug"),
                    Filter::contains_ignore_case("description", "mug"),
                    Filter::contains_ignore_case("category", "mug"),
                ]),
            ])
        );

        let product = doc! { "_id": ObjectId::new(), "title": "Mug", "category": "kitchen" };
        responder.send(Ok(vec![product.clone()])).unwrap();

        let listed = list_task.await.unwrap().unwrap();
        assert_eq!(listed, vec![product]);
    }

    #[tokio::test]
    async fn test_unfiltered_listing_matches_everything() {
        let (store, mut store_rx) = create_mock_store(10);
        let product_client = ProductClient::new(store);

        let list_task = tokio::spawn(async move { product_client.list_products(ProductQuery::default()).await });

        let (_, filter, limit, responder) = expect_find(&mut store_rx).await.expect("Expected Product Find");
        assert_eq!(filter, Filter::All);
        assert_eq!(limit, 50);
        responder.send(Ok(Vec::new())).unwrap();

        assert_eq!(list_task.await.unwrap(), Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_product_creation_flow() {
        let (store, mut store_rx) = create_mock_store(10);
        let product_client = ProductClient::new(store);

        let create_task = tokio::spawn(async move {
            let product = ProductCreate::new("Mug", "kitchen", Decimal::new(999, 2))
                .with_description("Stoneware")
                .with_field("_id", "client-chosen")
                .with_field("color", "blue");
            product_client.create_product(product).await
        });

        let (collection, document, responder) =
            expect_insert(&mut store_rx).await.expect("Expected Product Insert");
        assert_eq!(collection, "product");
        assert_eq!(document.get_str("title").unwrap(), "Mug");
        assert_eq!(document.get_str("description").unwrap(), "Stoneware");
        assert_eq!(document.get_str("color").unwrap(), "blue");
        assert!(!document.contains_key("_id"));

        let id = ObjectId::new();
        responder.send(Ok(id)).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok(id.to_hex()));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let (store, mut store_rx) = create_mock_store(10);
        let product_client = ProductClient::new(store);
        let id = ObjectId::new();

        let get_task = tokio::spawn(async move { product_client.get_product(&id.to_hex()).await });

        let (collection, requested, responder) =
            expect_find_one(&mut store_rx).await.expect("Expected Product FindOne");
        assert_eq!(collection, "product");
        assert_eq!(requested, id);
        responder.send(Ok(None)).unwrap();

        assert_eq!(get_task.await.unwrap(), Err(ProductError::NotFound(id.to_hex())));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_database_error() {
        let (store, mut store_rx) = create_mock_store(10);
        let product_client = ProductClient::new(store);

        let get_task = tokio::spawn(async move { product_client.get_product(&ObjectId::new().to_hex()).await });

        let (_, _, responder) = expect_find_one(&mut store_rx).await.expect("Expected Product FindOne");
        drop(responder);

        assert!(matches!(get_task.await.unwrap(), Err(ProductError::DatabaseError(_))));
    }
}

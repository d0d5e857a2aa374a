mod common;

use common::{Fixture, product};
use storefront::errors::AppError;
use storefront::models::{CartCreateRequest, CartItem, CartItemRequest};

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

async fn fixture_with_products() -> Result<Fixture, Box<dyn std::error::Error>> {
    let fx = Fixture::new().await?;
    fx.seed_products(&[product(1, "A", true, 5, "a.png"), product(2, "B", true, 3, "b.png")])?;
    Ok(fx)
}

#[tokio::test]
async fn test_empty_cart_gets_sequential_ids() -> TestResult {
    let fx = fixture_with_products().await?;

    let first = fx.carts.insert_one(CartCreateRequest::default()).await?;
    let second = fx.carts.insert_one(CartCreateRequest::default()).await?;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(first.products.is_empty());
    assert_eq!(fx.carts.get_all().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_create_with_items_merges_duplicates() -> TestResult {
    let fx = fixture_with_products().await?;

    let cart = fx
        .carts
        .insert_one(CartCreateRequest {
            products: vec![
                CartItemRequest { product: 2, quantity: Some(2) },
                CartItemRequest { product: 1, quantity: None },
                CartItemRequest { product: 2, quantity: Some(1) },
            ],
        })
        .await?;

    assert_eq!(
        cart.products,
        vec![
            CartItem { product: 2, quantity: 3 },
            CartItem { product: 1, quantity: 1 },
        ]
    );
    assert_eq!(fx.carts.get_one_by_id("1").await?, cart);
    Ok(())
}

#[tokio::test]
async fn test_create_with_unknown_product_adds_nothing() -> TestResult {
    let fx = fixture_with_products().await?;

    let err = fx
        .carts
        .insert_one(CartCreateRequest {
            products: vec![CartItemRequest { product: 9, quantity: None }],
        })
        .await
        .err()
        .ok_or("insert should fail")?;

    assert_eq!(err.code(), 404);
    assert!(fx.carts.get_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_add_product_increments_quantity() -> TestResult {
    let fx = fixture_with_products().await?;
    let cart = fx.carts.insert_one(CartCreateRequest::default()).await?;
    let cart_id = cart.id.to_string();

    fx.carts.add_one_product(&cart_id, "1", None).await?;
    let cart = fx.carts.add_one_product(&cart_id, "1", Some(4)).await?;

    assert_eq!(cart.products, vec![CartItem { product: 1, quantity: 5 }]);
    assert_eq!(fx.carts.get_one_by_id(&cart_id).await?, cart);
    Ok(())
}

#[tokio::test]
async fn test_add_product_errors() -> TestResult {
    let fx = fixture_with_products().await?;
    fx.carts.insert_one(CartCreateRequest::default()).await?;

    let unknown_product = fx.carts.add_one_product("1", "9", None).await.err().ok_or("product")?;
    let unknown_cart = fx.carts.add_one_product("5", "1", None).await.err().ok_or("cart")?;
    let zero = fx.carts.add_one_product("1", "1", Some(0)).await.err().ok_or("zero")?;

    assert_eq!(unknown_product.code(), 404);
    assert_eq!(unknown_cart.code(), 404);
    assert!(matches!(zero, AppError::Validation { .. }));
    assert!(fx.carts.get_one_by_id("1").await?.products.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_remove_product_line() -> TestResult {
    let fx = fixture_with_products().await?;
    fx.carts
        .insert_one(CartCreateRequest {
            products: vec![
                CartItemRequest { product: 1, quantity: Some(2) },
                CartItemRequest { product: 2, quantity: Some(1) },
            ],
        })
        .await?;

    let cart = fx.carts.remove_one_product("1", "1").await?;
    assert_eq!(cart.products, vec![CartItem { product: 2, quantity: 1 }]);

    let missing = fx.carts.remove_one_product("1", "1").await.err().ok_or("line")?;
    assert!(missing.is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_delete_cart() -> TestResult {
    let fx = fixture_with_products().await?;
    fx.carts.insert_one(CartCreateRequest::default()).await?;
    fx.carts.insert_one(CartCreateRequest::default()).await?;

    fx.carts.delete_one_by_id("1").await?;

    let remaining = fx.carts.get_all().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 2);
    assert_eq!(fx.carts.delete_one_by_id("1").await.err().ok_or("again")?.code(), 404);
    Ok(())
}

#[tokio::test]
async fn test_deleting_product_leaves_carts_alone() -> TestResult {
    let fx = fixture_with_products().await?;
    fx.carts.insert_one(CartCreateRequest::default()).await?;
    fx.carts.add_one_product("1", "2", Some(2)).await?;

    fx.products.delete_one_by_id("2").await?;

    let cart = fx.carts.get_one_by_id("1").await?;
    assert_eq!(cart.products, vec![CartItem { product: 2, quantity: 2 }]);
    Ok(())
}

#[tokio::test]
async fn test_exhausted_cart_ids_fail_without_overflow() -> TestResult {
    let fx = fixture_with_products().await?;
    let carts_path = fx.dir.path().join("files").join("carts.json");
    std::fs::write(&carts_path, format!("[{{\"id\": {}, \"products\": []}}]", u64::MAX))?;

    let err = fx
        .carts
        .insert_one(CartCreateRequest::default())
        .await
        .err()
        .ok_or("insert should fail")?;

    assert_eq!(err.code(), 500);
    assert_eq!(fx.carts.get_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_cart_inserts_get_distinct_ids() -> TestResult {
    let fx = fixture_with_products().await?;

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let carts = fx.carts.clone();
            tokio::spawn(async move { carts.insert_one(CartCreateRequest::default()).await })
        })
        .collect();

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await??.id);
    }
    ids.sort_unstable();

    assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
    Ok(())
}

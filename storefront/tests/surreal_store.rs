//! Store-trait conformance against the embedded SurrealDB backend.
//! Run: cargo test -p storefront --test surreal_store

use rust_decimal::Decimal;
use shared::models::{MenuItemCreate, OrderStatus, Profile};
use storefront::db::repository::{MenuItemRepository, OrderRepository, ProfileRepository, open};
use storefront::{
    CartItem, CartState, CheckoutRequest, CheckoutService, CustomerInfo, DeliveryAddress,
    FulfillmentService, Identity, MenuStore, OrderStore, PaymentMethod, ProfileStore,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn checkout_form() -> CheckoutRequest {
    CheckoutRequest {
        customer: CustomerInfo {
            full_name: "Teo Brandt".into(),
            email: "teo@example.com".into(),
            phone: "555-0193".into(),
        },
        delivery: DeliveryAddress {
            street: "3 Mill Lane".into(),
            city: "Bergen".into(),
            zip_code: "5003".into(),
        },
        payment_method: PaymentMethod::Card,
    }
}

#[tokio::test]
async fn surreal_backed_checkout_and_fulfillment() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let db = open(tmp.path()).await?;

    let menu = MenuItemRepository::new(db.clone());
    let orders = OrderRepository::new(db.clone());
    let profiles = ProfileRepository::new(db.clone());

    // Menu row round-trip, including the availability toggle.
    let item = menu
        .insert_menu_item(MenuItemCreate {
            name: "Pad Thai".into(),
            description: "Rice noodles, tamarind, peanuts".into(),
            price: dec("12.80"),
            category: "Mains".into(),
            image_url: String::new(),
            available: true,
        })
        .await?;
    let item_id = item.id.clone().unwrap();
    assert_eq!(item.price, dec("12.80"));

    let off = menu.set_menu_item_available(&item_id, false).await?;
    assert!(!off.available);
    assert!(menu.list_available().await?.is_empty());
    menu.set_menu_item_available(&item_id, true).await?;
    assert_eq!(menu.list_available().await?.len(), 1);

    // Profile is created lazily and non-admin, then promoted.
    let created = profiles.ensure_profile("staff-9").await?;
    assert!(!created.is_admin);
    assert_eq!(created.id, "staff-9");
    profiles
        .save_profile(Profile {
            is_admin: true,
            ..created
        })
        .await?;
    assert!(profiles.find_profile("staff-9").await?.unwrap().is_admin);

    // Checkout against the surreal-backed order store.
    let mut cart = CartState::default().add_item(CartItem::from_menu_item(&item, 2)?);
    let checkout = CheckoutService::new(&orders);
    let customer = Identity::new("customer-1", false);
    let order_id = checkout
        .submit(&mut cart, Some(&customer), checkout_form())
        .await?;
    assert!(cart.is_empty());

    // 12.80 * 2 = 25.60 subtotal; +8.5% tax +2.99 delivery
    let order = orders.find_order(&order_id).await?.unwrap();
    assert_eq!(order.user_id, "customer-1");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, dec("30.766"));

    let items = orders.list_order_items(&order_id).await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].menu_item_id, item_id);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].price, dec("12.80"));

    // Fulfillment with the real gate over the profile table.
    let fulfillment = FulfillmentService::new(&orders, &profiles);
    let staff = Identity::new("staff-9", true);

    let updated = fulfillment
        .advance(&order_id, OrderStatus::Preparing, &staff)
        .await?;
    assert_eq!(updated.status, OrderStatus::Preparing);
    assert!(updated.updated_at >= order.updated_at);

    // Skipping READY is still illegal on this backend.
    assert!(
        fulfillment
            .advance(&order_id, OrderStatus::Delivered, &staff)
            .await
            .is_err()
    );

    assert_eq!(fulfillment.all_orders(&staff).await?.len(), 1);
    assert_eq!(fulfillment.orders_for(&customer).await?.len(), 1);

    Ok(())
}

//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use merx_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{MockCartsService, models::{Cart, CartItem, CartItemUuid, CartStatus, CartUuid}},
        products::{MockProductsService, models::{Product, ProductUuid}},
        users::{MockUsersService, models::UserUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_register().never();
    users.expect_login().never();

    users
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_search_products().never();
    products.expect_get_product().never();
    products.expect_seed_initial_products().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_or_create_active_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();

    carts
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn make_state(
    users: MockUsersService,
    products: MockProductsService,
    carts: MockCartsService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        users: Arc::new(users),
        products: Arc::new(products),
        carts: Arc::new(carts),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_users(users: MockUsersService) -> Arc<State> {
    make_state(
        users,
        strict_products_mock(),
        strict_carts_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    make_state(
        strict_users_mock(),
        products,
        strict_carts_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    make_state(
        strict_users_mock(),
        strict_products_mock(),
        carts,
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(
        strict_users_mock(),
        strict_products_mock(),
        strict_carts_mock(),
        auth,
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_users(users)))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

/// Carts routes sit behind the auth middleware, so the test service injects
/// [`TEST_USER_UUID`] the way the middleware would.
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        title: "Dell UltraSharp U2723QE".to_string(),
        image: "https://images.example.com/u2723qe.jpg".to_string(),
        price: 9_999,
        stock: 10,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(user: UserUuid) -> Cart {
    Cart {
        uuid: CartUuid::new(),
        user_uuid: user,
        items: Vec::new(),
        total_amount: 0,
        status: CartStatus::Active,
        revision: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(product: ProductUuid, quantity: u32) -> CartItem {
    CartItem {
        uuid: CartItemUuid::new(),
        product_uuid: product,
        title: "Dell UltraSharp U2723QE".to_string(),
        unit_price: 9_999,
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

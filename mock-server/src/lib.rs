use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

#[derive(Deserialize)]
pub struct DraftProduct {
    pub name: String,
    pub price: f64,
}

/// Full replacement body. An `id` field, if sent, is ignored in favour of the
/// path.
#[derive(Deserialize)]
pub struct ReplaceProduct {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Every successful response is wrapped in `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    products: BTreeMap<i64, Product>,
}

impl Store {
    fn insert(&mut self, draft: DraftProduct) -> Product {
        self.next_id += 1;
        let product = Product {
            id: self.next_id,
            name: draft.name,
            price: draft.price,
            availability: true,
        };
        self.products.insert(product.id, product.clone());
        product
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<Json<Data<T>>, (StatusCode, Json<serde_json::Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product)
                .put(replace_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock products api listening");
    }
    axum::serve(listener, app()).await
}

fn not_found(id: i64) -> (StatusCode, Json<serde_json::Value>) {
    tracing::debug!(id, "product not found");
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Producto no encontrado" })),
    )
}

async fn list_products(State(db): State<Db>) -> Json<Data<Vec<Product>>> {
    let store = db.read().await;
    Json(Data {
        data: store.products.values().cloned().collect(),
    })
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<DraftProduct>,
) -> (StatusCode, Json<Data<Product>>) {
    let product = db.write().await.insert(input);
    tracing::debug!(id = product.id, "product created");
    (StatusCode::CREATED, Json(Data { data: product }))
}

async fn get_product(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Product> {
    let store = db.read().await;
    store
        .products
        .get(&id)
        .cloned()
        .map(|data| Json(Data { data }))
        .ok_or_else(|| not_found(id))
}

async fn replace_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ReplaceProduct>,
) -> ApiResult<Product> {
    let mut store = db.write().await;
    let product = store.products.get_mut(&id).ok_or_else(|| not_found(id))?;
    product.name = input.name;
    product.price = input.price;
    product.availability = input.availability;
    Ok(Json(Data {
        data: product.clone(),
    }))
}

async fn toggle_availability(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Product> {
    let mut store = db.write().await;
    let product = store.products.get_mut(&id).ok_or_else(|| not_found(id))?;
    product.availability = !product.availability;
    Ok(Json(Data {
        data: product.clone(),
    }))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<String> {
    let mut store = db.write().await;
    store
        .products
        .remove(&id)
        .map(|_| {
            Json(Data {
                data: "Producto eliminado".to_string(),
            })
        })
        .ok_or_else(|| not_found(id))
}

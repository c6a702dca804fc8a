use actix_web::{web, HttpResponse};
use lunch_pick::{
    config::Config,
    data::{CategoryFilter, FavoriteIcon, Restaurant, RestaurantForm, SortKey},
    Event, ListController, MemoryStorage, Snapshot, SqliteStorage, StorageAdapter,
};
use tokio::sync::Mutex;

type Controller = ListController<Box<dyn StorageAdapter>, Snapshot>;

pub(super) struct ApiState {
    // one event at a time, like a single UI thread
    controller: Mutex<Controller>,
}

impl ApiState {
    pub(super) async fn new(config: &Config) -> anyhow::Result<Self> {
        let storage: Box<dyn StorageAdapter> = match &config.database_url {
            Some(url) => Box::new(SqliteStorage::connect(url).await?),
            None => {
                tracing::warn!("DATABASE_URL not set, restaurants are kept in memory");
                Box::new(MemoryStorage::default())
            }
        };
        Self::with_storage(storage, config.default_sort).await
    }

    pub(super) async fn with_storage(
        storage: Box<dyn StorageAdapter>,
        sort: SortKey,
    ) -> anyhow::Result<Self> {
        let controller = ListController::init(storage, Snapshot::default(), sort).await?;
        Ok(Self {
            controller: Mutex::new(controller),
        })
    }
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(restaurants)
        .service(add_restaurant)
        .service(restaurant)
        .service(toggle_favorite)
        .service(favorites)
        .service(category_filter)
        .service(sort_filter);
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    message: String,
}

fn internal_error(err: anyhow::Error) -> HttpResponse {
    tracing::error!("fail to handle request: {err:#}");
    HttpResponse::InternalServerError().json(ErrJsonResp {
        message: err.to_string(),
    })
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrJsonResp {
        message: message.to_string(),
    })
}

fn not_found(id: u32) -> HttpResponse {
    HttpResponse::NotFound().json(ErrJsonResp {
        message: format!("no restaurant with id {id}"),
    })
}

#[derive(serde::Serialize)]
struct ListView<'a> {
    category: String,
    sort: SortKey,
    restaurants: Vec<&'a Restaurant>,
}

fn list_view(controller: &Controller) -> HttpResponse {
    HttpResponse::Ok().json(ListView {
        category: controller.category().to_string(),
        sort: controller.sort(),
        restaurants: controller.selected_list(),
    })
}

#[actix_web::get("/api/v1/restaurants")]
pub(super) async fn restaurants(data: web::Data<ApiState>) -> HttpResponse {
    let controller = data.controller.lock().await;
    list_view(&controller)
}

#[actix_web::post("/api/v1/restaurants")]
pub(super) async fn add_restaurant(
    data: web::Data<ApiState>,
    form: web::Json<RestaurantForm>,
) -> HttpResponse {
    let new = match form.into_inner().build() {
        Ok(new) => new,
        Err(err) => return bad_request(err),
    };

    let mut controller = data.controller.lock().await;
    match controller.add_restaurant(new).await {
        Ok(id) => HttpResponse::Created().json(controller.store().find(id)),
        Err(err) => internal_error(err),
    }
}

#[derive(serde::Deserialize)]
pub(super) struct RestaurantPath {
    id: u32,
}

#[actix_web::get("/api/v1/restaurants/{id}")]
pub(super) async fn restaurant(
    data: web::Data<ApiState>,
    path: web::Path<RestaurantPath>,
) -> HttpResponse {
    let mut controller = data.controller.lock().await;
    if let Err(err) = controller.handle(Event::ItemClicked(path.id)).await {
        return internal_error(err);
    }
    match controller.renderer_mut().take_detail() {
        Some(detail) => HttpResponse::Ok().json(detail),
        None => not_found(path.id),
    }
}

#[derive(serde::Serialize)]
struct FavoriteResp {
    id: u32,
    favorite: bool,
    icon: &'static str,
}

#[actix_web::post("/api/v1/restaurants/{id}/favorite")]
pub(super) async fn toggle_favorite(
    data: web::Data<ApiState>,
    path: web::Path<RestaurantPath>,
) -> HttpResponse {
    let mut controller = data.controller.lock().await;
    match controller.toggle_favorite(path.id).await {
        Ok(Some(favorite)) => HttpResponse::Ok().json(FavoriteResp {
            id: path.id,
            favorite,
            icon: FavoriteIcon::from(favorite).src(),
        }),
        Ok(None) => not_found(path.id),
        Err(err) => internal_error(err),
    }
}

#[actix_web::get("/api/v1/favorites")]
pub(super) async fn favorites(data: web::Data<ApiState>) -> HttpResponse {
    let controller = data.controller.lock().await;
    HttpResponse::Ok().json(&controller.renderer().favorite_list)
}

#[derive(serde::Deserialize)]
pub(super) struct Selector {
    value: String,
}

#[actix_web::put("/api/v1/filters/category")]
pub(super) async fn category_filter(
    data: web::Data<ApiState>,
    body: web::Json<Selector>,
) -> HttpResponse {
    let category = match body.value.parse::<CategoryFilter>() {
        Ok(category) => category,
        Err(hint) => return bad_request(format!("{hint}: {}", body.value)),
    };

    let mut controller = data.controller.lock().await;
    if let Err(err) = controller.handle(Event::CategoryChanged(category)).await {
        return internal_error(err);
    }
    list_view(&controller)
}

#[actix_web::put("/api/v1/filters/sort")]
pub(super) async fn sort_filter(
    data: web::Data<ApiState>,
    body: web::Json<Selector>,
) -> HttpResponse {
    let sort = match body.value.parse::<SortKey>() {
        Ok(sort) => sort,
        Err(hint) => return bad_request(hint),
    };

    let mut controller = data.controller.lock().await;
    if let Err(err) = controller.handle(Event::SortChanged(sort)).await {
        return internal_error(err);
    }
    list_view(&controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    const SEED: &str = r#"[
        {"id":1,"name":"Bob","distance":5,"category":"한식","favorite":false},
        {"id":2,"name":"Al","distance":2,"category":"중식","favorite":true}
    ]"#;

    async fn state() -> web::Data<ApiState> {
        let storage = MemoryStorage::with_entry(lunch_pick::store::KEY, SEED);
        let state = ApiState::with_storage(Box::new(storage), SortKey::Name)
            .await
            .unwrap();
        web::Data::new(state)
    }

    fn names(body: &Value) -> Vec<&str> {
        body["restaurants"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn test_list_and_filters() {
        let app = test::init_service(App::new().app_data(state().await).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/v1/restaurants").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), vec!["Al", "Bob"]);
        assert_eq!(body["category"], "전체");
        assert_eq!(body["sort"], "name");

        let req = test::TestRequest::put()
            .uri("/api/v1/filters/category")
            .set_json(json!({ "value": "한식" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&body), vec!["Bob"]);

        let req = test::TestRequest::put()
            .uri("/api/v1/filters/sort")
            .set_json(json!({ "value": "rating" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_detail_and_favorite() {
        let app = test::init_service(App::new().app_data(state().await).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/v1/restaurants/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Bob");

        let req = test::TestRequest::get().uri("/api/v1/restaurants/9").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/v1/restaurants/1/favorite")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["favorite"], true);
        assert_eq!(body["icon"], "./favorite-icon-filled.png");

        let req = test::TestRequest::get().uri("/api/v1/favorites").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_add_restaurant() {
        let app = test::init_service(App::new().app_data(state().await).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/restaurants")
            .set_json(json!({ "category": "양식", "name": "Pasta", "distance": 10 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 3);

        let req = test::TestRequest::post()
            .uri("/api/v1/restaurants")
            .set_json(json!({ "category": "양식", "distance": 10 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

use actix_web::http::header::Header;
use actix_web::{http::header, web, HttpRequest, HttpResponse, Result};
use actix_web_httpauth::headers::authorization::{Authorization, Basic};
use serde_json::json;

use crate::{
    accounts::{prepare_signup, AccountSummary, SignupForm},
    auth::{authenticate_credentials, AUTH_REALM},
    models::{Role, SERVICES, TIME_SLOTS, VEHICLE_CATEGORIES},
    state::AppState,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)))
        .service(web::resource("/services").route(web::get().to(services)))
        .service(web::resource("/signup").route(web::post().to(signup)))
        .service(web::resource("/login").route(web::get().to(login)))
        .service(web::resource("/health").route(web::get().to(health)));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn home(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "shop": state.shop_name,
        "services": SERVICES,
        "vehicle_categories": VEHICLE_CATEGORIES,
        "time_slots": TIME_SLOTS,
        "links": {
            "signup": "/signup",
            "login": "/login",
        },
    }))
}

async fn services() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "services": SERVICES,
        "vehicle_categories": VEHICLE_CATEGORIES,
        "time_slots": TIME_SLOTS,
    }))
}

async fn signup(
    state: web::Data<AppState>,
    form: web::Json<SignupForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let password_hash = prepare_signup(&form)?;

    let summary = {
        let mut accounts = state.accounts();
        let account = accounts.insert(
            Role::Customer,
            &form.name,
            &form.phone,
            &form.email,
            password_hash,
        )?;
        AccountSummary::from(account)
    };

    log::info!("New customer account for {}.", summary.name);
    Ok(HttpResponse::Created().json(summary))
}

/// Checks Basic credentials and tells the client which dashboard to open.
async fn login(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let auth = match Authorization::<Basic>::parse(&req) {
        Ok(auth) => auth,
        Err(_) => return auth_challenge(),
    };
    let credentials = auth.into_scheme();
    let password = credentials.password().unwrap_or_default();

    let Some(user) = authenticate_credentials(&state, credentials.user_id(), password) else {
        return auth_challenge();
    };

    let dashboard = match user.role {
        Role::Customer => "/customer/dashboard",
        Role::Mechanic => "/admin/dashboard",
    };

    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(json!({
            "name": user.name,
            "role": user.role,
            "dashboard": dashboard,
        }))
}

fn auth_challenge() -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((
            header::WWW_AUTHENTICATE,
            format!("Basic realm=\"{AUTH_REALM}\""),
        ))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use std::io::{Error, ErrorKind};

    use actix_files::Files;
    use actix_web::*;
    use leptos::logging::log;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use taco_tuesday::app::*;
    use taco_tuesday::auth::TokenKeys;
    use taco_tuesday::config::Config;
    use taco_tuesday::db::Database;

    let config = Config::load().map_err(|e| Error::new(ErrorKind::InvalidInput, e.to_string()))?;

    // Initialize the database
    let db = Database::new(&config.database_path).map_err(|e| Error::new(ErrorKind::Other, e))?;
    db.create_schema()
        .await
        .map_err(|e| Error::new(ErrorKind::Other, e))?;
    log!("[SERVER] Schema ready at {}", config.database_path);

    let keys = TokenKeys::new(&config.jwt_secret);

    // Load the Leptos site configuration from Cargo.toml
    let conf = get_configuration(None)
        .await
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    log!("[SERVER] Listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(keys.clone()))
            // JSON API before the Leptos routes
            .configure(taco_tuesday::api::configure)
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // to run: `trunk serve --open --features csr`
    use taco_tuesday::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}

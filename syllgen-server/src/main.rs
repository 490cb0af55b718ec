use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, put, web};
use clap::Parser;
use serde::Deserialize;

use syllgen_core::io::{BASE_EXTENSION, list_bases};
use syllgen_core::{GenerateOptions, Generator, NameGenError};

mod config;

use config::ServerConfig;

/// Most names returned by one `/v1/generate` call.
const MAX_COUNT: usize = 100;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	base: Option<String>,
	min: Option<usize>,
	max: Option<usize>,
	dupl: Option<String>, // characters that may not be doubled, ex. "ndl"
	count: Option<usize>,
}

struct SharedData {
	generator: Generator,
	data_dir: PathBuf,
}

impl GenerateParams {
	/// Turns the query into validated generation options.
	fn options(&self) -> Result<GenerateOptions, String> {
		let base = match &self.base {
			Some(b) if !b.trim().is_empty() => b.trim(),
			_ => return Err("Missing or empty base name".into()),
		};
		let options = GenerateOptions::new(base, self.min.unwrap_or(4), self.max.unwrap_or(12))
			.map_err(|e| e.to_string())?;
		Ok(options.with_no_duplicates(self.dupl.as_deref().unwrap_or("")))
	}

	fn count(&self) -> Result<usize, String> {
		match self.count.unwrap_or(1) {
			0 => Err("Count must be >= 1".into()),
			n if n > MAX_COUNT => Err(format!("Count must be <= {MAX_COUNT}")),
			n => Ok(n),
		}
	}
}

/// Base names double as file names, so only a safe subset is accepted.
fn is_valid_base_name(name: &str) -> bool {
	!name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// One example word per non-blank line.
fn split_words(body: &str) -> Vec<&str> {
	body.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

fn error_response(e: &NameGenError) -> HttpResponse {
	match e {
		NameGenError::InvalidOptions(_) | NameGenError::InvalidInput(_) | NameGenError::EmptyBase(_) => {
			HttpResponse::BadRequest().body(e.to_string())
		}
		NameGenError::InvalidBase(_) => HttpResponse::NotFound().body(e.to_string()),
		_ => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` names for `base`, one per line. A base that is not in
/// memory yet is loaded from the data directory.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let options = match query.options() {
		Ok(o) => o,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let count = match query.count() {
		Ok(c) => c,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let base = options.base_name();
	if !shared_data.generator.contains(base) {
		if !is_valid_base_name(base) {
			return HttpResponse::BadRequest().body(format!("Invalid base name: {base}"));
		}
		let path = shared_data.data_dir.join(format!("{base}.{BASE_EXTENSION}"));
		if !path.is_file() {
			return HttpResponse::NotFound().body(format!("Unknown base: {base}"));
		}
		if let Err(e) = shared_data.generator.load_base_file(&path) {
			return error_response(&e);
		}
	}

	let mut names = Vec::with_capacity(count);
	for _ in 0..count {
		match shared_data.generator.generate(&options) {
			Ok(name) => names.push(name),
			Err(e) => return error_response(&e),
		}
	}
	HttpResponse::Ok().body(names.join("\n"))
}

#[get("/v1/bases")]
async fn get_bases(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data_dir = match data.lock() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	match list_bases(&data_dir) {
		Ok(bases) => HttpResponse::Ok().body(bases.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list bases"),
	}
}

#[get("/v1/loaded_bases")]
async fn get_loaded_bases(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.base_names().join("\n"))
}

/// HTTP PUT endpoint `/v1/bases/{name}`
///
/// The body lists example words, one per line. They are merged into the
/// chain of the base (created if needed).
#[put("/v1/bases/{name}")]
async fn put_base(data: web::Data<Mutex<SharedData>>, name: web::Path<String>, body: String) -> impl Responder {
	let name = name.into_inner();
	if !is_valid_base_name(&name) {
		return HttpResponse::BadRequest().body(format!("Invalid base name: {name}"));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	match shared_data.generator.update_chain(&name, &split_words(&body)) {
		Ok(()) => HttpResponse::Ok().body(format!("Base {name} updated")),
		Err(e) => error_response(&e),
	}
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_bases)
		.service(get_loaded_bases)
		.service(put_base);
}

/// Main entry point for the server.
///
/// Creates the generator (optionally preloading every base of the data
/// directory), wraps it in a `Mutex` and starts the Actix-web HTTP server.
#[actix_web::main]
async fn main() -> io::Result<()> {
	let config = ServerConfig::parse();
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str())).init();

	let mut generator = Generator::with_capacity(config.cache_capacity).map_err(io::Error::other)?;
	if config.preload {
		let bases = generator.load_folder(&config.data_dir).map_err(io::Error::other)?;
		log::info!("preloaded bases: {}", bases.join(", "));
	}

	let shared_data = SharedData {
		generator,
		data_dir: config.data_dir.clone(),
	};
	let shared_generator = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(middleware::Logger::default())
			.app_data(shared_generator.clone())
			.configure(configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test as actix_test;

	fn shared(data_dir: PathBuf) -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData {
			generator: Generator::seeded(4, 5).unwrap(),
			data_dir,
		}))
	}

	#[test]
	fn base_names_are_restricted() {
		assert!(is_valid_base_name("celtic_wb"));
		assert!(is_valid_base_name("old-norse"));
		assert!(!is_valid_base_name("../etc/passwd"));
		assert!(!is_valid_base_name(""));
	}

	#[test]
	fn params_are_validated() {
		let params = GenerateParams { base: Some("x".into()), min: Some(6), max: Some(3), dupl: None, count: None };
		assert!(params.options().is_err());
		let params = GenerateParams { base: None, min: None, max: None, dupl: None, count: Some(0) };
		assert!(params.options().is_err());
		assert!(params.count().is_err());
	}

	#[actix_web::test]
	async fn put_then_generate() {
		let app = actix_test::init_service(App::new().app_data(shared(PathBuf::from("."))).configure(configure)).await;

		let req = actix_test::TestRequest::put()
			.uri("/v1/bases/norse")
			.set_payload("Bergen\nTrondheim\nStavanger\nKristiansand\n")
			.to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = actix_test::TestRequest::get().uri("/v1/loaded_bases").to_request();
		let body = actix_test::call_and_read_body(&app, req).await;
		assert_eq!(body, web::Bytes::from_static(b"norse"));

		// every start syllable of these words has 3+ letters, so min=2 always succeeds
		let req = actix_test::TestRequest::get().uri("/v1/generate?base=norse&min=2&max=40&count=3").to_request();
		let resp = actix_test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		let body = actix_test::read_body(resp).await;
		let body = std::str::from_utf8(&body).unwrap();
		let names: Vec<&str> = body.lines().collect();
		assert_eq!(names.len(), 3);
		assert!(names.iter().all(|n| n.chars().count() >= 2 && n.chars().next().unwrap().is_uppercase()));
	}

	#[actix_web::test]
	async fn unknown_base_is_not_found() {
		let dir = std::env::temp_dir();
		let app = actix_test::init_service(App::new().app_data(shared(dir)).configure(configure)).await;
		let req = actix_test::TestRequest::get().uri("/v1/generate?base=no_such_base_here").to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn empty_put_is_rejected() {
		let app = actix_test::init_service(App::new().app_data(shared(PathBuf::from("."))).configure(configure)).await;
		let req = actix_test::TestRequest::put().uri("/v1/bases/norse").set_payload("\n\n").to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}
}

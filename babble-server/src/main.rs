use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, put, web};

use serde::Deserialize;

use babble_core::error::ModelError;
use babble_core::model;
use babble_core::model::frequency_table::FrequencyTable;
use babble_core::model::generator::Generator;

/// Default sampling-step budget applied to HTTP generation requests.
///
/// The core's generation loop is unbounded by contract; an HTTP worker is
/// not, so the server imposes the external budget itself. A request can
/// override it, and `max_steps=0` opts back into unbounded generation.
const DEFAULT_MAX_STEPS: usize = 10_000;

/// Query parameters for the `PUT /v1/model` endpoint.
#[derive(Deserialize)]
struct TrainParams {
	n: usize,
}

/// Query parameters for the `GET /v1/generate` endpoint.
#[derive(Deserialize)]
struct GenerateParams {
	sentences: Option<usize>,
	max_steps: Option<usize>,
}

struct SharedData {
	table: Option<FrequencyTable>,
}

/// Maps a generation failure onto an HTTP status.
///
/// Parameter and model-state problems are the client's fault; a sampling
/// dead end or an exhausted budget is reported as a server-side failure.
fn error_response(error: &ModelError) -> HttpResponse {
	match error {
		ModelError::InvalidOrder(_)
		| ModelError::InvalidSentenceCount(_)
		| ModelError::EmptyModel => HttpResponse::BadRequest().body(error.to_string()),
		_ => HttpResponse::InternalServerError().body(error.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/model`
///
/// Builds a fresh frequency table of order `n` from the raw text in the
/// request body, replacing any previously loaded model.
#[put("/v1/model")]
async fn put_model(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<TrainParams>,
	body: String,
) -> impl Responder {
	let table = match model::build_model(&[body], query.n) {
		Ok(table) => table,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	log::info!("loaded model: order {}, {} histories", table.order(), table.len());
	shared_data.table = Some(table);
	HttpResponse::Ok().body("Model loaded successfully")
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates the requested number of sentences from the loaded model and
/// returns the formatted text as the response body.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let sentences = query.sentences.unwrap_or(1);
	let max_steps = query.max_steps.unwrap_or(DEFAULT_MAX_STEPS);

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let table = match &shared_data.table {
		Some(table) => table,
		None => return HttpResponse::BadRequest().body("No model loaded"),
	};

	let generator = match Generator::new(table) {
		Ok(generator) => generator,
		Err(e) => return error_response(&e),
	};
	let generator = match max_steps {
		0 => generator,
		budget => generator.with_max_steps(budget),
	};

	match generator.generate(sentences, &mut rand::rng()) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => error_response(&e),
	}
}

/// HTTP GET endpoint `/v1/model`
///
/// Returns the loaded frequency table as JSON, or 404 if none is loaded.
#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match &shared_data.table {
		Some(table) => HttpResponse::Ok().json(table),
		None => HttpResponse::NotFound().body("No model loaded"),
	}
}

/// Main entry point for the server.
///
/// Starts with no model loaded; clients upload a corpus through
/// `PUT /v1/model?n=...` and then generate through `GET /v1/generate`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - The model lives only in memory; restarting the server drops it.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

	let shared_data = SharedData { table: None };
	let shared_model = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.service(put_model)
			.service(get_generated)
			.service(get_model)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

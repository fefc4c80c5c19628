//! HTTP-level tests driving the router with `oneshot`.
//!
//! Tests without `#[ignore]` use a pool that points at a closed port:
//! they cover paths that must answer before (or without) touching the
//! database. The ignored ones need a real PostgreSQL in `DATABASE_URL`.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use petfamily_server::db::{create_lazy_pool, create_pool, migrations, PoolSettings};
use petfamily_server::http::{build_router, AppState, ServerConfig};

fn unreachable_app() -> Router {
    let settings = PoolSettings {
        acquire_timeout: Duration::from_millis(250),
        ..PoolSettings::default()
    };
    let pool = create_lazy_pool("postgres://petfamily@127.0.0.1:1/petfamily", &settings)
        .expect("url parses");
    build_router(AppState::new(pool), &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_is_served_without_database() {
    let app = unreachable_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_lodging_without_address_is_rejected() {
    let app = unreachable_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/hospedagens",
        Some(json!({ "nome": "Pousada Sol" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nome e ID do endereço são campos obrigatórios");
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["fields"], json!(["idEndereco"]));
}

#[tokio::test]
async fn malformed_postal_code_is_rejected() {
    let app = unreachable_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/ceps",
        Some(json!({ "codigo": "12345678", "idLogradouro": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Formato do CEP inválido. Use o formato XXXXX-XXX");
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let app = unreachable_app();
    let (status, body) = send(&app, Method::PUT, "/usuarios/5", Some(json!({ "foo": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nenhum campo válido para atualização fornecido");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = unreachable_app();
    let (status, body) = send(&app, Method::GET, "/hospedagens/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = unreachable_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/estados")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nome: "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contradictory_status_flags_are_rejected() {
    let app = unreachable_app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/status/1",
        Some(json!({ "aprovado": true, "negado": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Apenas um indicador de status pode ser verdadeiro");
}

#[tokio::test]
async fn bad_list_filter_is_rejected() {
    let app = unreachable_app();
    let (status, _) = send(&app, Method::GET, "/cidades?estadoId=sp", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_database_yields_clean_500() {
    let app = unreachable_app();
    let (status, body) = send(&app, Method::GET, "/hospedagens/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body["correlationId"].as_str().is_some());

    // The pool is still usable afterwards: a second request fails the same way
    let (status, _) = send(&app, Method::GET, "/estados", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Database-backed scenarios
//
// Every row is created with a random suffix. States are the exception:
// `sigla` has only 676 values, so chains hang off one shared state and the
// tests that need their own state delete it again.
// ---------------------------------------------------------------------------

const SHARED_SIGLA: &str = "ZZ";

async fn database_app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    build_router(AppState::new(pool), &ServerConfig::default())
}

fn unique() -> u128 {
    uuid::Uuid::new_v4().as_u128()
}

/// Short random suffix for names
fn tag() -> String {
    format!("{:08x}", unique() as u32)
}

/// Any of the 676 two-letter codes
fn random_sigla() -> String {
    let n = (unique() % 676) as u16;
    let first = char::from(b'A' + (n / 26) as u8);
    let second = char::from(b'A' + (n % 26) as u8);
    format!("{first}{second}")
}

fn id(row: &Value, alias: &str) -> i64 {
    row[alias]
        .as_i64()
        .unwrap_or_else(|| panic!("{alias} missing in {row}"))
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, response) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {response}");
    response["data"].clone()
}

async fn remove(app: &Router, uri: &str) {
    let (status, response) = send(app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::OK, "{uri}: {response}");
}

/// The state every address chain hangs off.
async fn shared_state(app: &Router) -> Value {
    for _ in 0..3 {
        let uri = format!("/estados/sigla/{SHARED_SIGLA}");
        let (status, body) = send(app, Method::GET, &uri, None).await;
        if status == StatusCode::OK {
            return body["data"].clone();
        }
        let (status, body) = send(
            app,
            Method::POST,
            "/estados",
            Some(json!({ "nome": "Estado de Testes", "sigla": SHARED_SIGLA })),
        )
        .await;
        if status == StatusCode::CREATED {
            return body["data"].clone();
        }
        // A concurrent test created it first
    }
    panic!("shared test state unavailable");
}

/// A state of its own; the caller deletes it.
async fn fresh_state(app: &Router, prefix: &str) -> Value {
    let nome = format!("{prefix} {}", tag());
    for _ in 0..100 {
        let sigla = random_sigla();
        if sigla == SHARED_SIGLA {
            continue;
        }
        let (status, body) = send(
            app,
            Method::POST,
            "/estados",
            Some(json!({ "nome": nome, "sigla": sigla })),
        )
        .await;
        match status {
            StatusCode::CREATED => return body["data"].clone(),
            StatusCode::CONFLICT => continue,
            other => panic!("{other}: {body}"),
        }
    }
    panic!("no free sigla left; clear the estado table");
}

/// cidade > bairro > logradouro > cep > endereco under the shared state
async fn address_chain(app: &Router) -> Value {
    let estado = shared_state(app).await;
    let t = tag();
    let cidade = create(
        app,
        "/cidades",
        json!({ "nome": format!("Cidade {t}"), "idEstado": estado["idEstado"] }),
    )
    .await;
    let bairro = create(
        app,
        "/bairros",
        json!({ "nome": "Centro", "idCidade": cidade["idCidade"] }),
    )
    .await;
    let logradouro = create(
        app,
        "/logradouros",
        json!({ "nome": "Rua das Flores", "idBairro": bairro["idBairro"] }),
    )
    .await;
    let n = unique() % 100_000_000;
    let cep = create(
        app,
        "/ceps",
        json!({
            "codigo": format!("{:05}-{:03}", n / 1000, n % 1000),
            "idLogradouro": logradouro["idLogradouro"]
        }),
    )
    .await;
    create(
        app,
        "/enderecos",
        json!({
            "idLogradouro": logradouro["idLogradouro"],
            "numero": 100,
            "idCep": cep["idCep"]
        }),
    )
    .await
}

fn user_payload() -> Value {
    let n = unique();
    json!({
        "nome": "Maria Teste",
        "cpf": format!("{:011}", n % 100_000_000_000),
        "email": format!("maria.{:016x}@example.com", n as u64),
        "senha": "segredo1"
    })
}

async fn lodging(app: &Router, endereco: &Value) -> Value {
    create(
        app,
        "/hospedagens",
        json!({ "nome": format!("Hotel {}", tag()), "idEndereco": endereco["idEndereco"] }),
    )
    .await
}

async fn service(app: &Router, hospedagem: &Value) -> Value {
    let uri = format!("/hospedagens/{}/servicos", id(hospedagem, "idHospedagem"));
    create(app, &uri, json!({ "descricao": format!("Banho {}", tag()), "preco": 45.5 })).await
}

async fn contract(app: &Router, hospedagem: &Value) -> Value {
    let usuario = create(app, "/usuarios", user_payload()).await;
    let status = create(app, "/status", json!({})).await;
    create(
        app,
        "/contrato",
        json!({
            "idHospedagem": hospedagem["idHospedagem"],
            "idUsuario": usuario["idUsuario"],
            "idStatus": status["idStatus"],
            "dataInicio": "2030-01-10",
            "dataFim": "2030-01-20"
        }),
    )
    .await
}

async fn species(app: &Router, name: &str) -> Value {
    create(app, "/especie", json!({ "descricao": format!("{name} {}", tag()) })).await
}

async fn breed(app: &Router, especie: &Value) -> Value {
    create(
        app,
        "/raca",
        json!({ "descricao": format!("Raça {}", tag()), "idEspecie": especie["idEspecie"] }),
    )
    .await
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_lodging_returns_enriched_row() {
    let app = database_app().await;
    let endereco = address_chain(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/hospedagens",
        Some(json!({ "nome": "Pousada Sol", "idEndereco": endereco["idEndereco"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Hospedagem criada com sucesso");
    let row = &body["data"];
    assert!(row["idHospedagem"].as_i64().is_some());
    assert_eq!(row["nome"], "Pousada Sol");
    assert_eq!(row["logradouro"], "Rua das Flores");
    assert_eq!(row["cidade"], endereco["cidade"]);
    assert_eq!(row["estado"], endereco["estado"]);

    // same name at the same address
    let (status, body) = send(
        &app,
        Method::POST,
        "/hospedagens",
        Some(json!({ "nome": "Pousada Sol", "idEndereco": endereco["idEndereco"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Já existe uma hospedagem com este nome no mesmo endereço");
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_reference_performs_no_write() {
    let app = database_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/hospedagens",
        Some(json!({ "nome": format!("Fantasma {}", tag()), "idEndereco": i32::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "reference_not_found");
    assert_eq!(body["message"], "Endereço não encontrado");
}

#[tokio::test]
#[ignore = "requires database"]
async fn partial_update_keeps_other_fields() {
    let app = database_app().await;
    let estado = fresh_state(&app, "Velho").await;
    let uri = format!("/estados/{}", id(&estado, "idEstado"));

    let update = json!({ "nome": format!("Novo {}", tag()) });
    let (status, first) = send(&app, Method::PUT, &uri, Some(update.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["sigla"], estado["sigla"]);
    assert_eq!(first["data"]["nome"], update["nome"]);

    // repeating the update is idempotent
    let (status, second) = send(&app, Method::PUT, &uri, Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["data"], first["data"]);

    remove(&app, &uri).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn user_phone_update_leaves_other_fields() {
    let app = database_app().await;
    let usuario = create(&app, "/usuarios", user_payload()).await;
    let uri = format!("/usuarios/{}", id(&usuario, "idUsuario"));

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "telefone": "(11) 98765-4321" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let row = &body["data"];
    assert_eq!(row["telefone"], "11987654321");
    assert_eq!(row["nome"], usuario["nome"]);
    assert_eq!(row["cpf"], usuario["cpf"]);
    assert_eq!(row["email"], usuario["email"]);
    assert!(row.get("senha").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_user_names_the_clashing_field() {
    let app = database_app().await;
    let first = user_payload();
    create(&app, "/usuarios", first.clone()).await;

    let mut same_cpf = user_payload();
    same_cpf["cpf"] = first["cpf"].clone();
    let (status, body) = send(&app, Method::POST, "/usuarios", Some(same_cpf)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "CPF já cadastrado");

    let mut same_email = user_payload();
    same_email["email"] = first["email"].clone();
    let (status, body) = send(&app, Method::POST, "/usuarios", Some(same_email)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email já cadastrado");
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_address_without_complement_conflicts() {
    let app = database_app().await;
    let endereco = address_chain(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/enderecos",
        Some(json!({
            "idLogradouro": endereco["idLogradouro"],
            "numero": 100,
            "idCep": endereco["idCep"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(
        body["message"],
        "Já existe um endereço com este número no mesmo logradouro e CEP"
    );

    // a complement makes it a different address
    let (status, _) = send(
        &app,
        Method::POST,
        "/enderecos",
        Some(json!({
            "idLogradouro": endereco["idLogradouro"],
            "numero": 100,
            "complemento": "Fundos",
            "idCep": endereco["idCep"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_blocked_by_dependents() {
    let app = database_app().await;
    let estado = fresh_state(&app, "Bloqueado").await;
    let uri = format!("/estados/{}", id(&estado, "idEstado"));
    let cidade = create(
        &app,
        "/cidades",
        json!({ "nome": "Dependente", "idEstado": estado["idEstado"] }),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Não é possível excluir o estado pois existem cidades vinculadas a ele"
    );

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    remove(&app, &format!("/cidades/{}", id(&cidade, "idCidade"))).await;
    remove(&app, &uri).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_returns_prior_row_then_404() {
    let app = database_app().await;
    let porte = create(&app, "/porte", json!({ "descricao": format!("Porte {}", tag()) })).await;
    let uri = format!("/porte/{}", id(&porte, "idPorte"));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], porte);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Porte não encontrado");
}

#[tokio::test]
#[ignore = "requires database"]
async fn postal_code_must_belong_to_street() {
    let app = database_app().await;
    let first = address_chain(&app).await;
    let second = address_chain(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/enderecos",
        Some(json!({
            "idLogradouro": first["idLogradouro"],
            "numero": 7,
            "idCep": second["idCep"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O CEP não pertence ao logradouro especificado");
}

#[tokio::test]
#[ignore = "requires database"]
async fn postal_code_in_use_keeps_its_street() {
    let app = database_app().await;
    let first = address_chain(&app).await;
    let second = address_chain(&app).await;
    let uri = format!("/ceps/{}", id(&first, "idCep"));

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "idLogradouro": second["idLogradouro"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O CEP está vinculado a endereços de outro logradouro");

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["idLogradouro"], first["idLogradouro"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn pet_breed_must_match_species() {
    let app = database_app().await;
    let dog = species(&app, "Cão").await;
    let cat = species(&app, "Gato").await;
    let labrador = breed(&app, &dog).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/pet",
        Some(json!({
            "idEspecie": cat["idEspecie"],
            "idRaca": labrador["idRaca"],
            "sexo": "f",
            "nascimento": "2020-05-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A raça informada não pertence à espécie");
}

#[tokio::test]
#[ignore = "requires database"]
async fn breed_with_pets_keeps_its_species() {
    let app = database_app().await;
    let dog = species(&app, "Cão").await;
    let cat = species(&app, "Gato").await;
    let labrador = breed(&app, &dog).await;
    create(
        &app,
        "/pet",
        json!({
            "idEspecie": dog["idEspecie"],
            "idRaca": labrador["idRaca"],
            "sexo": "M",
            "nascimento": "2020-05-01"
        }),
    )
    .await;

    let uri = format!("/raca/{}", id(&labrador, "idRaca"));
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "idEspecie": cat["idEspecie"] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "A raça está vinculada a pets de outra espécie");

    // a breed without pets can still move
    let unused = breed(&app, &dog).await;
    let uri = format!("/raca/{}", id(&unused, "idRaca"));
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "idEspecie": cat["idEspecie"] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["idEspecie"], cat["idEspecie"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn contract_end_cannot_precede_start() {
    let app = database_app().await;
    let endereco = address_chain(&app).await;
    let hospedagem = lodging(&app, &endereco).await;
    let existing = contract(&app, &hospedagem).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/contrato",
        Some(json!({
            "idHospedagem": existing["idHospedagem"],
            "idUsuario": existing["idUsuario"],
            "idStatus": existing["idStatus"],
            "dataInicio": "2030-03-10",
            "dataFim": "2030-03-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Data fim não pode ser anterior à data início");

    // checked against the stored start date on update
    let uri = format!("/contrato/{}", id(&existing, "idContrato"));
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "dataFim": "2030-01-01" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Data fim não pode ser anterior à data início");
}

#[tokio::test]
#[ignore = "requires database"]
async fn contract_service_must_share_lodging() {
    let app = database_app().await;
    let endereco = address_chain(&app).await;
    let first = lodging(&app, &endereco).await;
    let second = lodging(&app, &endereco).await;
    let contrato = contract(&app, &first).await;
    let elsewhere = service(&app, &second).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/contratoservico",
        Some(json!({
            "idContrato": contrato["idContrato"],
            "idServico": elsewhere["idServico"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O serviço não pertence à hospedagem do contrato");

    let local = service(&app, &first).await;
    create(
        &app,
        "/contratoservico",
        json!({ "idContrato": contrato["idContrato"], "idServico": local["idServico"] }),
    )
    .await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn linked_contract_and_service_keep_their_lodging() {
    let app = database_app().await;
    let endereco = address_chain(&app).await;
    let first = lodging(&app, &endereco).await;
    let second = lodging(&app, &endereco).await;
    let contrato = contract(&app, &first).await;
    let servico = service(&app, &first).await;
    create(
        &app,
        "/contratoservico",
        json!({ "idContrato": contrato["idContrato"], "idServico": servico["idServico"] }),
    )
    .await;
    let move_to_second = json!({ "idHospedagem": second["idHospedagem"] });

    let uri = format!("/servicos/{}", id(&servico, "idServico"));
    let (status, body) = send(&app, Method::PUT, &uri, Some(move_to_second.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O serviço está vinculado a contratos de outra hospedagem");

    let uri = format!("/contrato/{}", id(&contrato, "idContrato"));
    let (status, body) = send(&app, Method::PUT, &uri, Some(move_to_second)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "O contrato possui serviços de outra hospedagem");
}

#[tokio::test]
#[ignore = "requires database"]
async fn status_lifecycle_over_http() {
    let app = database_app().await;
    let status_row = create(&app, "/status", json!({})).await;
    assert_eq!(status_row["situacao"], "emAprovacao");
    let uri = format!("/status/{}", id(&status_row, "idStatus"));

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "aprovado": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["aprovado"], true);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "situacao": "concluido" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");
}

#[tokio::test]
#[ignore = "requires database"]
async fn services_are_nested_under_lodging() {
    let app = database_app().await;
    let (status, body) = send(&app, Method::GET, &format!("/hospedagens/{}/servicos", i32::MAX), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Hospedagem não encontrada");

    let endereco = address_chain(&app).await;
    let hospedagem = lodging(&app, &endereco).await;
    let lodging_id = id(&hospedagem, "idHospedagem");
    let servico = service(&app, &hospedagem).await;
    assert_eq!(servico["idHospedagem"], lodging_id);

    let (status, body) = send(&app, Method::GET, &format!("/hospedagens/{lodging_id}/servicos"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

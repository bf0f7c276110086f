use std::path::PathBuf;

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tokio::task;
use tracing::{info, warn};

use crate::{
    AppState,
    create::{EntryKind, create},
    error::AppError,
    graph::{ConvertOptions, convert},
    layout::{LayoutOptions, RankDirection, layout},
    models::{graph::GraphData, nodes::CreateNodeResponse},
    scan::scan,
};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health)
        .service(get_directory_tree)
        .service(
            web::scope("/api")
                .service(get_directory_tree)
                .service(create_node)
                .service(directory_graph)
                .service(relayout),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "dirgraph-backend",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryTreeRequest {
    project_path: PathBuf,
}

#[post("/get-directory-tree")]
async fn get_directory_tree(
    body: web::Json<DirectoryTreeRequest>,
) -> Result<HttpResponse, AppError> {
    let DirectoryTreeRequest { project_path } = body.into_inner();
    let tree = run_blocking(move || {
        scan(&project_path).map_err(|err| {
            warn!(error = %err, "directory scan failed");
            AppError::from(err)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(tree))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNodeRequest {
    parent_path: PathBuf,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

#[post("/create-node")]
async fn create_node(body: web::Json<CreateNodeRequest>) -> Result<HttpResponse, AppError> {
    let CreateNodeRequest {
        parent_path,
        name,
        kind,
    } = body.into_inner();
    let kind: EntryKind = kind.parse()?;

    run_blocking(move || {
        create(&parent_path, &name, kind).map_err(|err| {
            warn!(error = %err, parent = %parent_path.display(), %name, "node creation failed");
            AppError::from(err)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CreateNodeResponse {
        success: true,
        message: format!("{kind} created successfully!"),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryGraphRequest {
    project_path: PathBuf,
    rank_direction: Option<String>,
    sibling_edges: Option<bool>,
}

#[post("/directory-graph")]
async fn directory_graph(
    body: web::Json<DirectoryGraphRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let DirectoryGraphRequest {
        project_path,
        rank_direction,
        sibling_edges,
    } = body.into_inner();
    let options = layout_options(&state, rank_direction.as_deref())?;
    let convert_options = ConvertOptions {
        sibling_edges: sibling_edges.unwrap_or(state.sibling_edges),
    };

    let graph = run_blocking(move || {
        let tree = scan(&project_path).map_err(|err| {
            warn!(error = %err, "directory scan failed");
            AppError::from(err)
        })?;
        Ok(tree
            .map(|tree| layout(convert(&tree, convert_options), &options))
            .unwrap_or_default())
    })
    .await?;

    info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        direction = %options.direction,
        "built directory graph"
    );
    Ok(HttpResponse::Ok().json(graph))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutRequest {
    #[serde(flatten)]
    graph: GraphData,
    rank_direction: Option<String>,
}

#[post("/layout")]
async fn relayout(
    body: web::Json<LayoutRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LayoutRequest {
        graph,
        rank_direction,
    } = body.into_inner();
    let options = layout_options(&state, rank_direction.as_deref())?;

    Ok(HttpResponse::Ok().json(layout(graph, &options)))
}

fn layout_options(state: &AppState, requested: Option<&str>) -> Result<LayoutOptions, AppError> {
    let direction = match requested {
        Some(value) => value.parse::<RankDirection>()?,
        None => state.rank_direction,
    };
    Ok(LayoutOptions::new().direction(direction))
}

/// Filesystem work goes to the blocking pool so it does not stall the workers.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|err| AppError::Task(err.to_string()))?
}

use crate::frame::LoadedModels;
use anyhow::Context;
use mooring_core::assets::{build_scene, buffer_requests, parse_document, BufferRequest};
use mooring_core::{AssetError, ModelPlacement, SceneNode};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn fetch_error(path: &str, reason: impl std::fmt::Debug) -> AssetError {
    AssetError::Fetch {
        path: path.to_string(),
        reason: format!("{reason:?}"),
    }
}

/// GET `url` and return the response body.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    let window = web::window().ok_or_else(|| fetch_error(url, "no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fetch_error(url, e))?;
    let resp: web::Response = resp.dyn_into().map_err(|e| fetch_error(url, e))?;
    if !resp.ok() {
        return Err(fetch_error(url, format!("HTTP {}", resp.status())));
    }
    let body = resp.array_buffer().map_err(|e| fetch_error(url, e))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| fetch_error(url, e))?;
    Ok(js_sys::Uint8Array::new(&body).to_vec())
}

/// Fetch a model and every external buffer it references, then decode it.
pub async fn load_model(placement: &ModelPlacement) -> Result<SceneNode, AssetError> {
    let path = placement.path.as_str();
    let bytes = fetch_bytes(path).await?;
    let gltf = parse_document(path, &bytes)?;
    let mut buffers = Vec::new();
    for req in buffer_requests(&gltf, path)? {
        match req {
            BufferRequest::Ready(data) => buffers.push(data),
            BufferRequest::Fetch(url) => {
                log::debug!("[assets] {} fetching buffer {url}", placement.name);
                buffers.push(fetch_bytes(&url).await?);
            }
        }
    }
    build_scene(&gltf, &buffers, &placement.name, path)
}

/// Start loading every placement in the background. Finished models are
/// queued for the frame loop; failures are logged and the scene carries on
/// without them.
pub fn spawn_model_loads(placements: Vec<ModelPlacement>, loaded: LoadedModels) {
    for placement in placements {
        let loaded = loaded.clone();
        spawn_local(async move {
            log::info!("[assets] loading {} from {}", placement.name, placement.path);
            let result = load_model(&placement)
                .await
                .with_context(|| format!("loading model {}", placement.name));
            match result {
                Ok(root) => {
                    log::info!(
                        "[assets] {} loaded: {} meshes",
                        placement.name,
                        root.mesh_count()
                    );
                    loaded.borrow_mut().push((placement, root));
                }
                Err(e) => log::error!("[assets] {e:#}"),
            }
        });
    }
}

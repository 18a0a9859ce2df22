//! Asset fetching: one independent request per cassette plus the environment
//! map. Every completion is reported back into the shared showcase.

use crate::constants::ENVIRONMENT_URL;
use cassette_core::{import_glb, AssetError, EnvironmentLight, Showcase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    let window = web::window().ok_or_else(|| AssetError::fetch(url, "no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| AssetError::fetch(url, format!("{:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|_| AssetError::fetch(url, "response cast failed"))?;
    if !resp.ok() {
        return Err(AssetError::fetch(
            url,
            format!("HTTP {}: {}", resp.status(), resp.status_text()),
        ));
    }
    let buf = resp
        .array_buffer()
        .map_err(|e| AssetError::fetch(url, format!("{:?}", e)))?;
    let buf = JsFuture::from(buf)
        .await
        .map_err(|e| AssetError::fetch(url, format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Start every registry load; they complete in any order.
pub fn spawn_model_loads(showcase: &Rc<RefCell<Showcase>>) {
    let registry = showcase.borrow().registry();
    for (slot, desc) in registry.iter().enumerate() {
        let showcase = showcase.clone();
        spawn_local(async move {
            let outcome = fetch_bytes(desc.asset_path).await.and_then(|bytes| {
                log::info!("[loader] {} fetched ({} bytes)", desc.id, bytes.len());
                import_glb(&bytes, desc.id)
            });
            let mut s = showcase.borrow_mut();
            match outcome {
                Ok(template) => {
                    s.on_model_loaded(slot, &template);
                }
                Err(e) => {
                    s.on_model_failed(slot, &e);
                }
            }
        });
    }
}

pub fn spawn_environment_load(showcase: &Rc<RefCell<Showcase>>) {
    let showcase = showcase.clone();
    spawn_local(async move {
        let outcome = fetch_bytes(ENVIRONMENT_URL).await.and_then(|bytes| {
            log::info!("[env] fetched ({} bytes)", bytes.len());
            EnvironmentLight::decode_exr(&bytes, ENVIRONMENT_URL)
        });
        match outcome {
            Ok(env) => {
                log::info!(
                    "[env] mean radiance ({:.3},{:.3},{:.3})",
                    env.mean_radiance.x,
                    env.mean_radiance.y,
                    env.mean_radiance.z
                );
                showcase.borrow_mut().set_environment(env);
            }
            Err(e) => log::error!("[env] {}; continuing without environment light", e),
        }
    });
}

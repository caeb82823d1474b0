use axum::extract::{Form, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::debug;

use super::WebContext;
use super::page::{self, FormState, Outcome};
use crate::error::GeoError;
use crate::gemini::ModelClient;
use crate::geo::{Coordinates, Geolocation};
use crate::render::report::render_results;
use crate::verifier::Mode;

/// Fields posted by the form. Coordinates arrive as strings because the
/// hidden inputs are submitted empty until the browser fills them.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyForm {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub use_geo: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

impl VerifyForm {
    fn geo_requested(&self) -> bool {
        self.use_geo.as_deref().is_some_and(|v| !v.is_empty())
    }

    fn coordinates(&self) -> Option<Result<Coordinates, GeoError>> {
        let lat = self.latitude.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let lng = self.longitude.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        match (lat.parse::<f64>(), lng.parse::<f64>()) {
            (Ok(lat), Ok(lng)) => Some(Coordinates::new(lat, lng)),
            _ => Some(Err(GeoError::NoCoordinates)),
        }
    }

    /// Toggle state as seen by the server. A checked box without
    /// coordinates means the browser has not answered yet.
    pub fn geolocation(&self) -> Geolocation {
        let mut geo = Geolocation::new();
        if self.geo_requested() {
            geo.begin();
            if let Some(result) = self.coordinates() {
                geo.resolve(result);
            }
        }
        geo
    }

    fn state(&self, geo: Geolocation) -> FormState {
        FormState {
            mode: self.mode,
            input: self.input.clone(),
            geo,
        }
    }
}

pub async fn index<C: ModelClient + 'static>(State(ctx): State<WebContext<C>>) -> Html<String> {
    Html(page::render(
        &FormState::default(),
        None,
        ctx.config.progress_interval_ms,
    ))
}

pub async fn verify<C: ModelClient + 'static>(
    State(ctx): State<WebContext<C>>,
    Form(form): Form<VerifyForm>,
) -> Html<String> {
    let geo = form.geolocation();
    debug!("POST /verify mode={} geo={:?}", form.mode, geo.status());

    let outcome = match ctx.verifier.verify_with_geo(form.mode, &form.input, &geo).await {
        Ok(verification) => Outcome::Results(render_results(&verification)),
        Err(e) => Outcome::Error(e.user_message()),
    };

    Html(page::render(
        &form.state(geo),
        Some(&outcome),
        ctx.config.progress_interval_ms,
    ))
}

pub async fn health() -> &'static str {
    "ok"
}

/// Markup of the front-end page: input form, geolocation toggle, progress
/// steps and the result area.
use crate::geo::{Geolocation, LocationStatus};
use crate::progress::STEPS;
use crate::render::escape;
use crate::render::report::page_shell;
use crate::verifier::Mode;

/// Values echoed back into the form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub mode: Mode,
    pub input: String,
    /// Toggle state; acquired coordinates go back into the hidden inputs.
    pub geo: Geolocation,
}

/// What to show below the form.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Rendered result cards.
    Results(String),
    /// User-facing error message.
    Error(String),
}

const PAGE_STYLE: &str = r#"<style>
.panel { background: #1e293b80; border: 1px solid #334155; border-radius: .5rem; padding: 1rem; }
.tabs { display: flex; justify-content: center; gap: .5rem; margin-bottom: 1rem; }
.tabs label { padding: .5rem 1rem; border-radius: .375rem; background: #1e293b; color: #94a3b8; cursor: pointer; font-weight: 600; font-size: .875rem; }
.tabs input { display: none; }
.tabs input:checked + span { color: #fff; }
.tabs label:has(input:checked) { background: #06b6d4; color: #fff; }
textarea, input[type=text] { width: 100%; box-sizing: border-box; padding: 1rem; background: #1e293b; border: 2px solid #334155; border-radius: .5rem; color: #e2e8f0; font: inherit; }
textarea { height: 6rem; resize: none; }
button { margin-top: .75rem; background: #0891b2; color: #fff; font-weight: 700; border: 0; border-radius: .5rem; padding: .5rem 1.25rem; cursor: pointer; }
.geo { text-align: center; margin: 1rem 0; font-size: .875rem; color: #94a3b8; }
.error-text { color: #f87171; }
#progress { list-style: none; padding: 1.5rem; }
#progress li { margin: .75rem 0; opacity: .4; }
#progress li.active { opacity: 1; color: #67e8f9; }
#progress li.completed { opacity: .6; }
#progress li.completed::before { content: "✔ "; color: #4ade80; }
#progress li p { margin: 0; font-size: .875rem; color: #94a3b8; }
.empty { text-align: center; color: #64748b; margin-top: 3rem; }
</style>"#;

/// Advances the step list every `__INTERVAL__` ms after submit, stopping on
/// the final step; the page is replaced when the response arrives.
const PAGE_SCRIPT: &str = r#"<script>
(function () {
  var geo = document.getElementById('use_geo');
  var msg = document.getElementById('geo-msg');
  var lat = document.getElementById('latitude');
  var lng = document.getElementById('longitude');
  function locate() {
    msg.className = 'muted';
    msg.textContent = '(Requesting location...)';
    navigator.geolocation.getCurrentPosition(function (p) {
      lat.value = p.coords.latitude; lng.value = p.coords.longitude;
      msg.textContent = '(Location acquired!)';
    }, function (e) {
      geo.checked = false; msg.className = 'error-text';
      msg.textContent = '(Error: ' + e.message + '.)';
    });
  }
  geo.addEventListener('change', function () {
    lat.value = ''; lng.value = '';
    if (!geo.checked) { msg.className = 'muted'; msg.textContent = '(Enable for location-based claims.)'; return; }
    locate();
  });
  if (geo.checked && !lat.value) { locate(); }
  var form = document.getElementById('verify-form');
  form.addEventListener('submit', function () {
    var list = document.getElementById('progress');
    var steps = list.querySelectorAll('li');
    var cur = 0;
    function paint() {
      steps.forEach(function (li, i) {
        li.className = i < cur ? 'completed' : (i === cur ? 'active' : 'pending');
      });
    }
    list.hidden = false;
    document.getElementById('results').hidden = true;
    form.querySelector('button').textContent = 'Verifying...';
    paint();
    var timer = setInterval(function () {
      if (cur < steps.length - 2) { cur++; }
      if (cur >= steps.length - 2) { cur = steps.length - 1; clearInterval(timer); }
      paint();
    }, __INTERVAL__);
  });
})();
</script>"#;

fn mode_tab(current: Mode, target: Mode, label: &str) -> String {
    let checked = if current == target { " checked" } else { "" };
    format!("<label><input type=\"radio\" name=\"mode\" value=\"{target}\"{checked}><span>{label}</span></label>")
}

fn progress_list() -> String {
    let mut html = String::from("<ol id=\"progress\" class=\"panel\" hidden>");
    for step in STEPS.iter() {
        html.push_str(&format!(
            "<li class=\"pending\"><strong>{}</strong><p>{}</p></li>",
            escape(step.title),
            escape(step.description)
        ));
    }
    html.push_str("</ol>");
    html
}

/// Full page.
#[must_use]
pub fn render(form: &FormState, outcome: Option<&Outcome>, progress_interval_ms: u64) -> String {
    let placeholder = match form.mode {
        Mode::Text => {
            "e.g., The Eiffel Tower is taller than the Empire State Building and is the most visited monument."
        }
        Mode::Url => "e.g., https://www.example.com/news/article-to-verify",
    };

    let mut body = String::from(
        "<h1 class=\"title\">Truth Verifier</h1><p class=\"tagline\">The AI agent that deconstructs claims, analyzes sources, and verifies with facts.</p>",
    );
    body.push_str(PAGE_STYLE);

    body.push_str("<form id=\"verify-form\" method=\"post\" action=\"/verify\"><div class=\"panel\"><div class=\"tabs\">");
    body.push_str(&mode_tab(form.mode, Mode::Text, "Verify Text"));
    body.push_str(&mode_tab(form.mode, Mode::Url, "Verify from URL"));
    body.push_str("</div>");
    body.push_str(&format!(
        "<textarea name=\"input\" placeholder=\"{}\" required>{}</textarea><button type=\"submit\">Verify</button></div>",
        escape(placeholder),
        escape(&form.input)
    ));

    let geo_checked = if form.geo.is_enabled() { " checked" } else { "" };
    let msg_class = if form.geo.status() == LocationStatus::Error {
        "error-text"
    } else {
        "muted"
    };
    let (lat, lng) = form
        .geo
        .coordinates()
        .map(|c| (c.latitude.to_string(), c.longitude.to_string()))
        .unwrap_or_default();
    body.push_str(&format!(
        "<div class=\"geo\"><label><input type=\"checkbox\" id=\"use_geo\" name=\"use_geo\" value=\"on\"{geo_checked}> Use Geo-location</label> <span id=\"geo-msg\" class=\"{msg_class}\">({msg})</span><input type=\"hidden\" id=\"latitude\" name=\"latitude\" value=\"{lat}\"><input type=\"hidden\" id=\"longitude\" name=\"longitude\" value=\"{lng}\"></div></form>",
        msg = escape(form.geo.message()),
    ));

    body.push_str(&progress_list());

    body.push_str("<div id=\"results\">");
    match outcome {
        Some(Outcome::Error(msg)) => {
            body.push_str(&format!("<div class=\"error\">{}</div>", escape(msg)));
        }
        Some(Outcome::Results(cards)) if !cards.is_empty() => body.push_str(cards),
        Some(Outcome::Results(_)) => {
            body.push_str("<p class=\"empty\">The model returned no claim analyses.</p>");
        }
        None => body.push_str(
            "<p class=\"empty\">Enter a claim or an article URL to see a verdict, a sub-claim breakdown and a source landscape.</p>",
        ),
    }
    body.push_str("</div>");

    body.push_str(&PAGE_SCRIPT.replace("__INTERVAL__", &progress_interval_ms.to_string()));

    page_shell("Truth Verifier", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page() {
        let html = render(&FormState::default(), None, 1800);
        assert!(html.contains("name=\"mode\" value=\"text\" checked"));
        assert!(html.contains("Enter a claim or an article URL"));
        assert_eq!(html.matches("<li class=\"pending\">").count(), 5);
        assert!(html.contains("}, 1800);"));
        assert!(!html.contains("__INTERVAL__"));
    }

    #[test]
    fn test_echoes_form_and_error() {
        let mut geo = Geolocation::new();
        geo.begin();
        let form = FormState {
            mode: Mode::Url,
            input: "https://example.com/<a>".to_string(),
            geo,
        };
        let outcome = Outcome::Error("Please enter a url to verify.".to_string());
        let html = render(&form, Some(&outcome), 500);
        assert!(html.contains("value=\"url\" checked"));
        assert!(html.contains(">https://example.com/&lt;a&gt;</textarea>"));
        assert!(html.contains("name=\"use_geo\" value=\"on\" checked"));
        assert!(html.contains("<div class=\"error\">Please enter a url to verify.</div>"));
    }

    #[test]
    fn test_results_inserted() {
        let outcome = Outcome::Results("<section class=\"card\">x</section>".to_string());
        let html = render(&FormState::default(), Some(&outcome), 1800);
        assert!(html.contains("<div id=\"results\"><section class=\"card\">x</section></div>"));
    }

    #[test]
    fn test_acquired_location_kept_in_form() {
        let mut geo = Geolocation::new();
        geo.begin();
        geo.resolve(crate::geo::Coordinates::new(48.8584, 2.2945));
        let form = FormState {
            geo,
            ..Default::default()
        };
        let html = render(&form, None, 1800);
        assert!(html.contains("name=\"use_geo\" value=\"on\" checked"));
        assert!(html.contains("name=\"latitude\" value=\"48.8584\""));
        assert!(html.contains("name=\"longitude\" value=\"2.2945\""));
        assert!(html.contains("<span id=\"geo-msg\" class=\"muted\">(Location acquired!)</span>"));
    }
}

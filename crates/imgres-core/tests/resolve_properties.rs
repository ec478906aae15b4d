//! End-to-end checks of the public resolver and failure-handler API.

use imgres_core::image_url::{resolve, BackendOrigin, ImageResolver, DEFAULT_FALLBACK};
use imgres_core::load_failure::{on_load_failure, FailureOutcome, ImageSurface};
use proptest::prelude::*;

/// Inputs covering every rule plus the pathological overlaps.
const SAMPLES: &[&str] = &[
    "",
    "http;//example.com/a.png",
    "https;//example.com/a.png",
    "/static/img.png",
    "/static/uploads/1700000000_image.webp",
    "/static/a;b.png",
    "data:image/png;base64,AAAA",
    "data;image/png;base64,AAAA",
    "example.com/a.png",
    "localhost:8000/static/a.png",
    "http://example.com/a.png",
    "https://example.com/a;b;c.png",
    ";//host/a",
    ";",
    "/",
    "/placeholder.svg",
    "//cdn.example.com/a.png",
    "ftp://example.com/a.png",
];

#[test]
fn documented_examples() {
    let r = ImageResolver::default();
    assert_eq!(r.resolve(None), "/placeholder.svg");
    assert_eq!(r.resolve(Some("")), "/placeholder.svg");
    assert_eq!(
        r.resolve(Some("http;//example.com/a.png")),
        "http://example.com/a.png"
    );
    assert_eq!(
        r.resolve(Some("/static/img.png")),
        "http://localhost:8000/static/img.png"
    );
    assert_eq!(
        r.resolve(Some("data:image/png;base64,AAAA")),
        "data:image/png;base64,AAAA"
    );
    assert_eq!(
        r.resolve(Some("example.com/a.png")),
        "http://example.com/a.png"
    );
    assert_eq!(
        r.resolve(Some("https://example.com/a.png")),
        "https://example.com/a.png"
    );
}

#[test]
fn free_function_matches_resolver() {
    let origin = BackendOrigin::default();
    let r = ImageResolver::default();
    for &input in SAMPLES {
        assert_eq!(
            resolve(&origin, Some(input), DEFAULT_FALLBACK),
            r.resolve(Some(input)),
            "input {input:?}"
        );
    }
}

#[test]
fn resolution_is_idempotent() {
    let origin = BackendOrigin::parse("https://media.gallery.example:8443").unwrap();
    for resolver in [
        ImageResolver::default(),
        ImageResolver::new(origin, "/img/none.png"),
    ] {
        for &input in SAMPLES {
            let once = resolver.resolve(Some(input));
            let twice = resolver.resolve(Some(once.as_str()));
            assert_eq!(twice, once, "input {input:?}");
        }
    }
}

#[test]
fn output_is_loadable() {
    let r = ImageResolver::default();
    for &input in SAMPLES {
        let out = r.resolve(Some(input));
        let ok = out == r.fallback()
            || out.starts_with("data:")
            || out.starts_with("DATA:")
            || out.starts_with("http://")
            || out.starts_with("https://");
        assert!(ok, "input {input:?} resolved to {out:?}");
    }
}

#[test]
fn semicolon_then_root_relative_ordering() {
    let r = ImageResolver::default();
    assert_eq!(
        r.resolve(Some("/static/a;b.png")),
        "http://localhost:8000/static/a:b.png"
    );
    // Repair never creates a leading slash, so this one falls through to rule 5.
    assert_eq!(r.resolve(Some(";//host/a")), "http://://host/a");
    assert_eq!(r.resolve(Some(";")), "http://:");
}

#[test]
fn configured_origin_is_used() {
    let origin = BackendOrigin::parse("http://10.0.0.5:9000/").unwrap();
    let r = ImageResolver::new(origin, DEFAULT_FALLBACK);
    assert_eq!(
        r.resolve(Some("/static/uploads/x.jpg")),
        "http://10.0.0.5:9000/static/uploads/x.jpg"
    );
    assert_eq!(r.resolve(Some("/")), "http://10.0.0.5:9000/");
}

struct Card {
    title: String,
    image: String,
}

impl ImageSurface for Card {
    fn source(&self) -> &str {
        &self.image
    }

    fn set_source(&mut self, src: String) {
        self.image = src;
    }
}

#[test]
fn card_falls_back_once() {
    let r = ImageResolver::default();
    let raw = "/static/uploads/missing.png";
    let mut card = Card {
        title: "Blue Hour".to_string(),
        image: r.resolve(Some(raw)),
    };
    let handler = on_load_failure(raw, Some(r.fallback()));

    assert_eq!(handler.handle(&mut card), FailureOutcome::Substituted);
    assert_eq!(card.image, "/placeholder.svg");
    assert_eq!(handler.handle(&mut card), FailureOutcome::FallbackFailed);
    assert_eq!(card.image, "/placeholder.svg");
    assert_eq!(card.title, "Blue Hour");
}

fn is_loadable(out: &str, fallback: &str) -> bool {
    let lower = out.get(..8).unwrap_or(out).to_ascii_lowercase();
    out == fallback
        || lower.starts_with("data:")
        || lower.starts_with("http://")
        || lower.starts_with("https://")
}

/// Strings glued together from the fragments the rules look at.
fn reference_pieces() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(";"),
            Just(":"),
            Just("/"),
            Just("//"),
            Just("data"),
            Just("DATA"),
            Just("http"),
            Just("https"),
            Just("HTTP"),
            Just("placeholder.svg"),
            Just("example.com"),
            Just("é"),
            Just("画"),
            Just(","),
            Just("a"),
        ],
        0..10,
    )
    .prop_map(|parts| parts.concat())
}

fn any_reference() -> impl Strategy<Value = String> {
    prop_oneof![reference_pieces(), any::<String>()]
}

fn resolvers() -> [ImageResolver; 2] {
    [
        ImageResolver::default(),
        ImageResolver::new(
            BackendOrigin::parse("https://media.gallery.example:8443").unwrap(),
            "/img/none.png",
        ),
    ]
}

proptest! {
    #[test]
    fn prop_resolution_is_idempotent(input in any_reference()) {
        for resolver in resolvers() {
            let once = resolver.resolve(Some(input.as_str()));
            let twice = resolver.resolve(Some(once.as_str()));
            prop_assert_eq!(twice, once);
        }
    }

    #[test]
    fn prop_output_is_non_empty_and_loadable(input in any_reference()) {
        for resolver in resolvers() {
            let out = resolver.resolve(Some(input.as_str()));
            prop_assert!(!out.is_empty());
            prop_assert!(
                is_loadable(&out, resolver.fallback()),
                "input {:?} resolved to {:?}", input, out
            );
        }
    }

    #[test]
    fn prop_non_empty_input_keeps_its_tail(input in any_reference()) {
        prop_assume!(!input.is_empty());
        let out = ImageResolver::default().resolve(Some(input.as_str()));
        // Only the first semicolon may change, and only ever into a colon.
        let repaired = input.replacen(';', ":", 1);
        prop_assert!(out.ends_with(input.as_str()) || out.ends_with(repaired.as_str()));
    }

    #[test]
    fn prop_failure_handler_never_panics(original in any::<String>(), current in any_reference()) {
        let handler = on_load_failure(&original, None);
        let mut src = current.clone();
        let outcome = handler.handle(&mut src);
        prop_assert_eq!(src.as_str(), "/placeholder.svg");
        if current == "/placeholder.svg" {
            prop_assert_eq!(outcome, FailureOutcome::FallbackFailed);
        } else {
            prop_assert_eq!(outcome, FailureOutcome::Substituted);
        }
    }
}

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::lifecycle::TweenEvent;
use crate::easing::{Easing, TweenValue};
use crate::tweens::value::{LoopMode, ValueTween};

/// Named tween definitions for an app, loaded from a JSON file at
/// runtime so animation timing can be tuned without a rebuild.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TweenManifest {
    /// Named tween lookup.
    #[serde(default)]
    pub tweens: HashMap<String, TweenDef>,
}

/// Declarative description of a single value tween.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TweenDef {
    pub from: Endpoint,
    pub to: Endpoint,
    /// Duration of one pass in seconds.
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default, rename = "loop")]
    pub loop_mode: LoopMode,
    /// Completion event id reported through the runner (optional).
    #[serde(default)]
    pub event: Option<u32>,
}

/// A tween endpoint: a scalar or a 2-component vector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Scalar(f32),
    Pair([f32; 2]),
}

impl TweenManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, name: &str) -> Option<&TweenDef> {
        self.tweens.get(name)
    }

    /// Instantiate a named scalar tween. None (with a warning) if the
    /// name is unknown or the endpoints are not scalars.
    pub fn build_scalar(&self, name: &str) -> Option<ValueTween<f32>> {
        let def = self.lookup(name)?;
        match (def.from, def.to) {
            (Endpoint::Scalar(from), Endpoint::Scalar(to)) => {
                Some(configure(ValueTween::new(from, to, def.duration, def.easing), def))
            }
            _ => {
                log::warn!("tween '{}' does not have scalar endpoints", name);
                None
            }
        }
    }

    /// Instantiate a named vector tween. None (with a warning) if the
    /// name is unknown or the endpoints are not 2-component.
    pub fn build_vec2(&self, name: &str) -> Option<ValueTween<Vec2>> {
        let def = self.lookup(name)?;
        match (def.from, def.to) {
            (Endpoint::Pair(from), Endpoint::Pair(to)) => Some(configure(
                ValueTween::new(Vec2::from(from), Vec2::from(to), def.duration, def.easing),
                def,
            )),
            _ => {
                log::warn!("tween '{}' does not have vector endpoints", name);
                None
            }
        }
    }

    fn lookup(&self, name: &str) -> Option<&TweenDef> {
        let def = self.tweens.get(name);
        if def.is_none() {
            log::warn!("no tween named '{}' in manifest", name);
        }
        def
    }
}

fn configure<V: TweenValue>(tween: ValueTween<V>, def: &TweenDef) -> ValueTween<V> {
    let tween = tween.with_loop(def.loop_mode);
    match def.event {
        Some(id) => tween.with_completion(TweenEvent(id)),
        None => tween,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lifecycle::{TickResult, Tweenable};

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "tweens": {
                "fade_out": { "from": 1.0, "to": 0.0, "duration": 0.5 }
            }
        }"#;
        let manifest = TweenManifest::from_json(json).unwrap();
        let def = manifest.get("fade_out").unwrap();
        assert_eq!(def.duration, 0.5);
        assert_eq!(def.easing, Easing::Linear);
        assert_eq!(def.loop_mode, LoopMode::Once);
        assert_eq!(def.event, None);
    }

    #[test]
    fn parse_full_definition() {
        let json = r#"{
            "tweens": {
                "slide_in": {
                    "from": [-120.0, 0.0],
                    "to": [0.0, 0.0],
                    "duration": 0.75,
                    "easing": "back_out",
                    "loop": "ping_pong",
                    "event": 3
                }
            }
        }"#;
        let manifest = TweenManifest::from_json(json).unwrap();
        let def = manifest.get("slide_in").unwrap();
        assert_eq!(def.easing, Easing::BackOut);
        assert_eq!(def.loop_mode, LoopMode::PingPong);
        assert_eq!(def.event, Some(3));
    }

    #[test]
    fn empty_manifest_parses() {
        let manifest = TweenManifest::from_json("{}").unwrap();
        assert!(manifest.tweens.is_empty());
    }

    #[test]
    fn build_scalar_runs_the_definition() {
        let json = r#"{
            "tweens": {
                "fade_out": { "from": 1.0, "to": 0.0, "duration": 1.0 }
            }
        }"#;
        let manifest = TweenManifest::from_json(json).unwrap();
        let mut tween = manifest.build_scalar("fade_out").unwrap();

        tween.tick(0.5);
        assert!((tween.value() - 0.5).abs() < 0.01);
        assert_eq!(tween.tick(0.5), TickResult::Finished);
    }

    #[test]
    fn build_vec2_runs_the_definition() {
        let json = r#"{
            "tweens": {
                "slide": { "from": [0.0, 0.0], "to": [10.0, 20.0], "duration": 1.0 }
            }
        }"#;
        let manifest = TweenManifest::from_json(json).unwrap();
        let mut tween = manifest.build_vec2("slide").unwrap();

        tween.tick(0.5);
        let v = tween.value();
        assert!((v.x - 5.0).abs() < 0.01);
        assert!((v.y - 10.0).abs() < 0.01);
    }

    #[test]
    fn endpoint_kind_mismatch_yields_none() {
        let json = r#"{
            "tweens": {
                "slide": { "from": [0.0, 0.0], "to": [10.0, 20.0], "duration": 1.0 }
            }
        }"#;
        let manifest = TweenManifest::from_json(json).unwrap();
        assert!(manifest.build_scalar("slide").is_none());
    }

    #[test]
    fn unknown_name_yields_none() {
        let manifest = TweenManifest::from_json("{}").unwrap();
        assert!(manifest.build_scalar("missing").is_none());
        assert!(manifest.build_vec2("missing").is_none());
    }

    #[test]
    fn completion_event_survives_the_build() {
        let json = r#"{
            "tweens": {
                "ping": { "from": 0.0, "to": 1.0, "duration": 0.1, "event": 42 }
            }
        }"#;
        let manifest = TweenManifest::from_json(json).unwrap();
        let tween = manifest.build_scalar("ping").unwrap();
        assert_eq!(tween.completion_event(), Some(TweenEvent(42)));
    }
}

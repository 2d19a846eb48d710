use super::*;
use crate::fx::parse::parse_fx_str;

fn kind(spec: &str) -> Option<EffectKind> {
    let item = parse_fx_str(spec).into_iter().next()?;
    EffectKind::from_args(&item.name, &item.args)
}

#[test]
fn defaults_are_resolved() {
    assert_eq!(kind("bounce"), Some(EffectKind::Bounce { scale: 0.94 }));
    assert_eq!(
        kind("ripple"),
        Some(EffectKind::Ripple {
            radius: 80.0,
            opacity: 0.18
        })
    );
    assert_eq!(kind("presspop"), Some(EffectKind::PressPop { scale: 1.08 }));
    assert_eq!(
        kind("fly"),
        Some(EffectKind::Fly {
            target: None,
            duration_ms: 700.0
        })
    );
    assert_eq!(
        kind("spring"),
        Some(EffectKind::SpringPhysics {
            damping: 3.0,
            stiffness: 50.0
        })
    );
    assert_eq!(
        kind("sparkle"),
        Some(EffectKind::Burst {
            style: BurstStyle::Sparkle,
            color: "#f5d0fe".to_string(),
            duration_ms: 680.0
        })
    );
}

#[test]
fn arguments_override_defaults() {
    assert_eq!(kind("bounce(s=0.9)"), Some(EffectKind::Bounce { scale: 0.9 }));
    assert_eq!(
        kind("ripple(r=120, op=0.3)"),
        Some(EffectKind::Ripple {
            radius: 120.0,
            opacity: 0.3
        })
    );
    assert_eq!(
        kind("neon(color=#ff00ff)"),
        Some(EffectKind::NeonGlow {
            color: "#ff00ff".to_string()
        })
    );
    assert_eq!(
        kind("fly(t=300)"),
        Some(EffectKind::Fly {
            target: None,
            duration_ms: 300.0
        })
    );
}

#[test]
fn non_numeric_values_fall_back() {
    assert_eq!(kind("bounce(s=big)"), Some(EffectKind::Bounce { scale: 0.94 }));
    assert_eq!(
        kind("pulse(interval=0)"),
        Some(EffectKind::Pulse {
            interval_ms: 1600.0
        })
    );
}

#[test]
fn fly_target_resolution() {
    let target = |spec: &str| match kind(spec) {
        Some(EffectKind::Fly { target, .. }) | Some(EffectKind::AddToCart { target }) => target,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(target("fly(cart)"), Some("cart".to_string()));
    assert_eq!(target("fly(to=bag)"), Some("bag".to_string()));
    assert_eq!(target("fly(target=bag, cart)"), Some("bag".to_string()));
    assert_eq!(target("addtocart(basket)"), Some("basket".to_string()));
    // Several flags are ambiguous; text values never name a target.
    assert_eq!(target("fly(cart, vibrate)"), None);
    assert_eq!(target("fly(color=red)"), None);
    assert_eq!(target("fly"), None);
}

#[test]
fn toast_text_and_duration() {
    assert_eq!(
        kind("toast(message='Saved!', duration=900)"),
        Some(EffectKind::Toast {
            text: Some("Saved!".to_string()),
            duration_ms: Some(900.0)
        })
    );
    assert_eq!(
        kind("toast(t=0)"),
        Some(EffectKind::Toast {
            text: None,
            duration_ms: None
        })
    );
}

#[test]
fn aliases_share_the_canonical_name() {
    for (alias, name) in [
        ("elastic", "elasticscale"),
        ("neon", "neonglow"),
        ("tilt", "perspectivetilt"),
        ("magnetic", "magnetichover"),
        ("spring", "springphysics"),
        ("flip", "flipcard"),
        ("wave", "wave3d"),
        ("quantum", "quantumblur"),
        ("liquid", "liquidswipe"),
        ("explosion", "particleexplosion"),
        ("particles", "particleexplosion"),
    ] {
        assert_eq!(kind(alias).map(|k| k.name()), Some(name), "{alias}");
    }
}

#[test]
fn every_builtin_name_constructs() {
    let args = FxArgs::new();
    for name in BUILTIN_NAMES {
        assert!(EffectKind::from_args(name, &args).is_some(), "{name}");
    }
    assert!(EffectKind::from_args("sparkles", &args).is_none());
}

#[test]
fn describe_lists_resolved_arguments() {
    assert_eq!(EffectKind::Bounce { scale: 0.9 }.describe(), "bounce(s=0.9)");
    assert_eq!(EffectKind::Shake.describe(), "shake");
    assert_eq!(
        kind("fly(cart)").map(|k| k.describe()),
        Some("fly(to=cart, t=700)".to_string())
    );
}

#[test]
fn ambient_behaviors_have_periods() {
    assert_eq!(EffectKind::Glow.ambient_period_ms(), Some(2400.0));
    assert_eq!(EffectKind::Heartbeat.ambient_period_ms(), Some(1400.0));
    assert_eq!(kind("pulse(interval=800)").and_then(|k| k.ambient_period_ms()), Some(800.0));
    assert_eq!(EffectKind::Shake.ambient_period_ms(), None);
}

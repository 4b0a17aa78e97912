//! Audio context routing tests
//!
//! Covers default resolution, lookup failures and the guarantee that a
//! failed request leaves every channel exactly as it was.

use cue_audio::{
    AudioConfig, AudioContainer, AudioContext, AudioContextBuilder, AudioError, ChannelId,
    ClipId, FadeSettings, MemoryChannel, PlayRequest, Sound, SoundCategory,
};
use std::io::Write;
use std::time::Duration;

// ============================================================================
// TEST UTILITIES
// ============================================================================

struct Rig {
    context: AudioContext,
    music: MemoryChannel,
    sfx: MemoryChannel,
}

fn container(music: &[(&str, f32)], sfx: &[(&str, f32)], tag: &str) -> AudioContainer {
    let mut container = AudioContainer::new();
    for (name, volume) in music {
        container
            .insert(
                SoundCategory::Music,
                Sound::new(*name, *volume, format!("{tag}/{name}.ogg").as_str()),
            )
            .unwrap();
    }
    for (name, volume) in sfx {
        container
            .insert(
                SoundCategory::Sfx,
                Sound::new(*name, *volume, format!("{tag}/{name}.wav").as_str()),
            )
            .unwrap();
    }
    container
}

fn rig_with(builder: AudioContextBuilder) -> Rig {
    let music = MemoryChannel::new();
    let sfx = MemoryChannel::new();
    let context = builder
        .music_channel(music.clone())
        .sfx_channel(sfx.clone())
        .build()
        .unwrap();
    Rig {
        context,
        music,
        sfx,
    }
}

fn croco_rig() -> Rig {
    rig_with(
        AudioContext::builder()
            .default_container("default")
            .container("default", container(&[("intro", 0.5)], &[("click", 1.0)], "default"))
            .container("croco-set", container(&[("croco", 0.8)], &[], "croco-set")),
    )
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn croco_scenario_plays_looping_music() {
    let mut rig = croco_rig();

    rig.context
        .play_music(&PlayRequest::new("croco").in_container("croco-set"))
        .unwrap();

    let state = rig.music.snapshot();
    assert_eq!(state.clip, Some(ClipId::new("croco-set/croco.ogg")));
    assert!(state.looping);
    assert!(state.playing);
}

#[test]
fn croco_scenario_missing_sound_leaves_channel_unchanged() {
    let mut rig = croco_rig();
    rig.context
        .play_music(&PlayRequest::new("croco").in_container("croco-set"))
        .unwrap();
    let before = rig.music.snapshot();

    let err = rig
        .context
        .play_music(&PlayRequest::new("missing").in_container("croco-set"))
        .unwrap_err();

    match err {
        AudioError::SoundNotFound {
            container,
            category,
            name,
        } => {
            assert_eq!(container, "croco-set");
            assert_eq!(category, SoundCategory::Music);
            assert_eq!(name, "missing");
        }
        other => panic!("expected SoundNotFound, got {other}"),
    }
    assert_eq!(rig.music.snapshot(), before);
}

#[test]
fn unknown_container_leaves_channels_unchanged() {
    let mut rig = croco_rig();
    let music_before = rig.music.snapshot();
    let sfx_before = rig.sfx.snapshot();

    let err = rig
        .context
        .play_music(&PlayRequest::new("croco").in_container("NewLocation"))
        .unwrap_err();
    assert!(matches!(err, AudioError::ContainerNotFound(ref name) if name == "NewLocation"));

    let err = rig
        .context
        .play_sfx(&PlayRequest::new("click").in_container("NewLocation"))
        .unwrap_err();
    assert!(matches!(err, AudioError::ContainerNotFound(_)));

    assert_eq!(rig.music.snapshot(), music_before);
    assert_eq!(rig.sfx.snapshot(), sfx_before);
}

#[test]
fn missing_default_container_is_container_not_found() {
    let mut rig = rig_with(
        AudioContext::builder()
            .default_container("default")
            .container("croco-set", container(&[("croco", 0.8)], &[], "croco-set")),
    );

    let err = rig.context.play_music(&PlayRequest::new("croco")).unwrap_err();
    assert!(matches!(err, AudioError::ContainerNotFound(ref name) if name == "default"));
    assert_eq!(rig.music.snapshot().play_count, 0);
}

#[test]
fn new_music_cuts_the_previous_track() {
    let mut rig = croco_rig();
    rig.context.play_music(&PlayRequest::new("intro")).unwrap();
    rig.context
        .play_music(&PlayRequest::new("croco").in_container("croco-set"))
        .unwrap();

    let state = rig.music.snapshot();
    assert_eq!(state.clip, Some(ClipId::new("croco-set/croco.ogg")));
    assert_eq!(state.play_count, 2);
}

#[test]
fn music_does_not_touch_channel_volume() {
    let mut rig = croco_rig();
    rig.context
        .channel_mut(&ChannelId::new("music"))
        .unwrap()
        .set_volume(0.3);

    rig.context.play_music(&PlayRequest::new("intro")).unwrap();
    assert_eq!(rig.music.snapshot().volume, 0.3);
}

#[test]
fn explicit_channel_overrides_global() {
    let mut rig = croco_rig();
    let stage = MemoryChannel::new();
    rig.context.add_channel("stage", stage.clone());

    rig.context
        .play_music(&PlayRequest::new("intro").on_channel("stage"))
        .unwrap();

    assert!(stage.snapshot().playing);
    assert_eq!(rig.music.snapshot().play_count, 0);
}

#[test]
fn play_without_fade_matches_play_music() {
    let mut direct = croco_rig();
    let mut dispatched = croco_rig();
    let request = PlayRequest::new("croco").in_container("croco-set");

    direct.context.play_music(&request).unwrap();
    dispatched.context.play(&request).unwrap();

    assert_eq!(direct.music.snapshot(), dispatched.music.snapshot());
    assert!(!dispatched.context.is_fading());
}

// ============================================================================
// SFX
// ============================================================================

#[test]
fn sfx_uses_volume_of_the_requested_container() {
    let mut rig = rig_with(
        AudioContext::builder()
            .default_container("A")
            .container("A", container(&[], &[("ping", 0.2)], "A"))
            .container("B", container(&[], &[("ping", 0.9)], "B")),
    );

    rig.context
        .play_sfx(&PlayRequest::new("ping").in_container("B"))
        .unwrap();

    let shots = rig.sfx.one_shots();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].clip, ClipId::new("B/ping.wav"));
    assert_eq!(shots[0].volume, 0.9);

    rig.context.play_sfx(&PlayRequest::new("ping")).unwrap();
    let shots = rig.sfx.one_shots();
    assert_eq!(shots[1].clip, ClipId::new("A/ping.wav"));
    assert_eq!(shots[1].volume, 0.2);
}

#[test]
fn sfx_never_changes_persistent_channel_state() {
    let mut rig = croco_rig();
    let shared = MemoryChannel::new();
    rig.context.add_channel("shared", shared.clone());
    rig.context
        .play_music(&PlayRequest::new("intro").on_channel("shared"))
        .unwrap();
    let before = shared.snapshot();

    for _ in 0..25 {
        rig.context
            .play_sfx(&PlayRequest::new("click").on_channel("shared"))
            .unwrap();
    }

    let after = shared.snapshot();
    assert_eq!(after.clip, before.clip);
    assert_eq!(after.looping, before.looping);
    assert_eq!(after.volume, before.volume);
    assert_eq!(after.playing, before.playing);
    assert_eq!(after.one_shots.len(), 25);
}

#[test]
fn sfx_miss_plays_nothing() {
    let mut rig = croco_rig();
    let err = rig.context.play_sfx(&PlayRequest::new("quack")).unwrap_err();

    assert!(err.is_not_found());
    assert!(rig.sfx.one_shots().is_empty());
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn context_from_config_uses_configured_channels() {
    let config = AudioConfig::from_json(
        r#"{
            "default_container": "default",
            "music_channel": "bgm",
            "sfx_channel": "fx",
            "containers": {
                "default": {
                    "music": [{ "name": "croco", "volume": 0.8, "clip": "croco.ogg" }],
                    "sfx": [{ "name": "gay", "volume": 0.7, "clip": "gay.wav" }]
                },
                "NewLocation": {
                    "music": [{ "name": "french", "volume": 0.6, "clip": "french.ogg" }],
                    "sfx": [{ "name": "quack", "volume": 0.5, "clip": "quack.wav" }]
                }
            }
        }"#,
    )
    .unwrap();

    let bgm = MemoryChannel::new();
    let fx = MemoryChannel::new();
    let mut context = AudioContextBuilder::from_config(config)
        .music_channel(bgm.clone())
        .sfx_channel(fx.clone())
        .build()
        .unwrap();

    assert_eq!(context.music_channel_id().as_str(), "bgm");
    assert_eq!(context.sfx_channel_id().as_str(), "fx");

    context
        .play(&PlayRequest::new("french").in_container("NewLocation"))
        .unwrap();
    context
        .play_sfx(&PlayRequest::new("quack").in_container("NewLocation"))
        .unwrap();

    assert_eq!(bgm.snapshot().clip, Some(ClipId::new("french.ogg")));
    assert_eq!(fx.one_shots()[0].volume, 0.5);
}

#[test]
fn context_from_config_file_finds_mixed_case_container() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
[containers.default]
music = [{ name = "croco", volume = 0.8, clip = "croco.ogg" }]

[containers.NewLocation]
music = [{ name = "french", volume = 0.6, clip = "french.ogg" }]
"#,
    )
    .unwrap();

    let config = AudioConfig::load(Some(file.path())).unwrap();
    let music = MemoryChannel::new();
    let mut context = AudioContextBuilder::from_config(config)
        .music_channel(music.clone())
        .sfx_channel(MemoryChannel::new())
        .build()
        .unwrap();

    context
        .play(&PlayRequest::new("french").in_container("NewLocation"))
        .unwrap();
    assert_eq!(music.snapshot().clip, Some(ClipId::new("french.ogg")));

    let err = context
        .play(&PlayRequest::new("french").in_container("newlocation"))
        .unwrap_err();
    assert!(matches!(err, AudioError::ContainerNotFound(_)));
}

#[test]
fn failed_fade_request_leaves_channel_unchanged() {
    let mut rig = croco_rig();
    let before = rig.music.snapshot();

    let err = rig
        .context
        .play(&PlayRequest::new("croco").with_fade(FadeSettings::default()))
        .unwrap_err();
    assert!(matches!(err, AudioError::SoundNotFound { .. }));

    rig.context.tick(Duration::from_secs(2));
    assert_eq!(rig.music.snapshot(), before);
}

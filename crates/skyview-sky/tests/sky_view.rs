use glam::Vec3;
use skyview_sky::{
    MeshKind, ScatteringUniforms, SkyHost, SkySettings, SkyView, UniformName, UniformValue,
};
use skyview_ui::{ControlValue, ParameterPanel};

#[derive(Debug, Clone, PartialEq)]
enum HostCall {
    AddMesh(MeshKind),
    RemoveMesh(MeshKind),
    SetUniform(UniformName, UniformValue),
    PlaceSunMarker(Vec3, bool),
    RequestRedraw,
}

/// Records every call and mirrors the uniform state it was given.
#[derive(Default)]
struct RecordingHost {
    calls: Vec<HostCall>,
    uniforms: ScatteringUniforms,
    meshes: Vec<MeshKind>,
    marker: Option<(Vec3, bool)>,
}

impl RecordingHost {
    fn redraws(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == HostCall::RequestRedraw)
            .count()
    }

    fn sun_position(&self) -> Vec3 {
        match self.uniforms.get(UniformName::SunPosition) {
            UniformValue::Vec3(position) => position,
            other => panic!("sunPosition holds {other:?}"),
        }
    }
}

impl SkyHost for RecordingHost {
    fn add_mesh(&mut self, kind: MeshKind) {
        self.calls.push(HostCall::AddMesh(kind));
        self.meshes.push(kind);
    }

    fn remove_mesh(&mut self, kind: MeshKind) {
        self.calls.push(HostCall::RemoveMesh(kind));
        self.meshes.retain(|mesh| *mesh != kind);
    }

    fn set_uniform(&mut self, name: UniformName, value: UniformValue) {
        self.calls.push(HostCall::SetUniform(name, value));
        self.uniforms.set(name, value).unwrap();
    }

    fn place_sun_marker(&mut self, position: Vec3, visible: bool) {
        self.calls.push(HostCall::PlaceSunMarker(position, visible));
        self.marker = Some((position, visible));
    }

    fn request_redraw(&mut self) {
        self.calls.push(HostCall::RequestRedraw);
    }
}

fn attached() -> (SkyView, RecordingHost) {
    let mut view = SkyView::new(SkySettings::default());
    let mut host = RecordingHost::default();
    view.attach(&mut host);
    (view, host)
}

#[test]
fn test_attach_adds_meshes_and_pushes_defaults() {
    let (_view, host) = attached();

    assert_eq!(host.meshes, vec![MeshKind::SkyDome, MeshKind::SunMarker]);
    assert_eq!(
        host.calls[2],
        HostCall::PlaceSunMarker(Vec3::new(0.0, -700_000.0, 0.0), false)
    );
    assert_eq!(
        host.uniforms.get(UniformName::Turbidity),
        UniformValue::Float(10.0)
    );
    assert_eq!(
        host.uniforms.get(UniformName::Rayleigh),
        UniformValue::Float(2.0)
    );

    let sun = host.sun_position();
    assert!(sun.x.abs() < 1e-2);
    assert!((sun.y - 12_566.0).abs() <= 5.0);
    assert!((sun.z + 399_803.0).abs() <= 1.0);

    let (marker_position, marker_visible) = host.marker.unwrap();
    assert_eq!(marker_position, sun);
    assert!(!marker_visible);
    assert_eq!(host.calls.last(), Some(&HostCall::RequestRedraw));
}

#[test]
fn test_refresh_pushes_all_six_uniforms() {
    let (mut view, mut host) = attached();
    host.calls.clear();
    view.refresh(&mut host);

    let names: Vec<UniformName> = host
        .calls
        .iter()
        .filter_map(|call| match call {
            HostCall::SetUniform(name, _) => Some(*name),
            _ => None,
        })
        .collect();
    assert_eq!(names, UniformName::ALL);
    assert_eq!(host.redraws(), 1);
}

#[test]
fn test_refresh_is_idempotent() {
    let (mut view, mut host) = attached();
    view.refresh(&mut host);
    let first = host.uniforms;
    let first_marker = host.marker;
    view.refresh(&mut host);
    assert_eq!(host.uniforms, first);
    assert_eq!(host.marker, first_marker);
    assert_eq!(view.uniforms(), &first);
}

#[test]
fn test_panel_change_reaches_host() {
    let (mut view, mut host) = attached();
    let mut panel = ParameterPanel::new("sky");
    SkyView::register_controls(&mut panel).unwrap();

    let change = panel
        .set_value(&mut view, "luminance", ControlValue::Number(1.5), |view, _| {
            view.refresh(&mut host)
        })
        .unwrap();
    assert!(change.is_some());
    assert_eq!(
        host.uniforms.get(UniformName::Luminance),
        UniformValue::Float(1.5)
    );

    // same value again is not a change, so nothing is pushed
    let before = host.calls.len();
    let change = panel
        .set_value(&mut view, "luminance", ControlValue::Number(1.5), |view, _| {
            view.refresh(&mut host)
        })
        .unwrap();
    assert!(change.is_none());
    assert_eq!(host.calls.len(), before);
}

#[test]
fn test_sun_toggle_shows_marker() {
    let (mut view, mut host) = attached();
    let mut panel = ParameterPanel::new("sky");
    SkyView::register_controls(&mut panel).unwrap();

    panel
        .set_value(&mut view, "sun", ControlValue::Toggle(true), |view, _| {
            view.refresh(&mut host)
        })
        .unwrap();
    let (position, visible) = host.marker.unwrap();
    assert!(visible);
    assert_eq!(position, host.sun_position());
}

#[test]
fn test_out_of_range_values_pass_through() {
    let (mut view, mut host) = attached();
    let mut panel = ParameterPanel::new("sky");
    SkyView::register_controls(&mut panel).unwrap();

    panel
        .set_value(&mut view, "turbidity", ControlValue::Number(50.0), |view, _| {
            view.refresh(&mut host)
        })
        .unwrap();
    assert_eq!(
        host.uniforms.get(UniformName::Turbidity),
        UniformValue::Float(50.0)
    );
}

#[test]
fn test_half_half_places_sun_on_x_axis() {
    let mut view = SkyView::new(SkySettings::default());
    let mut host = RecordingHost::default();
    let mut panel = ParameterPanel::new("sky");
    SkyView::register_controls(&mut panel).unwrap();
    view.attach(&mut host);

    for name in ["inclination", "azimuth"] {
        panel
            .set_value(&mut view, name, ControlValue::Number(0.5), |view, _| {
                view.refresh(&mut host)
            })
            .unwrap();
    }
    let sun = host.sun_position();
    assert_eq!(sun, Vec3::new(400_000.0, 0.0, 0.0));
}

#[test]
fn test_advance_increases_inclination_monotonically() {
    let (mut view, mut host) = attached();
    let mut previous = view.settings().sun.inclination;
    for _ in 0..100 {
        assert!(view.advance(16.0, &mut host));
        let inclination = view.settings().sun.inclination;
        assert!(inclination > previous);
        previous = inclination;
    }
    assert!((previous - (0.49 + 100.0 * 16.0 * 0.00003)).abs() < 1e-9);
}

#[test]
fn test_sun_trajectory_is_continuous_through_one() {
    let settings = SkySettings {
        sun_speed: 0.0001,
        ..SkySettings::default()
    };
    let mut view = SkyView::new(settings);
    let mut host = RecordingHost::default();
    view.attach(&mut host);

    // each 16 ms step moves the sun about 2000 units along a 400000 orbit
    let mut previous = view.sun_offset();
    while view.settings().sun.inclination < 1.2 {
        view.advance(16.0, &mut host);
        let offset = view.sun_offset();
        assert!((offset - previous).length() < 5_000.0);
        previous = offset;
    }
    assert!(view.settings().sun.inclination > 1.0);
}

#[test]
fn test_paused_view_does_not_push() {
    let (mut view, mut host) = attached();
    view.pause();
    host.calls.clear();
    assert!(!view.advance(1_000.0, &mut host));
    assert!(host.calls.is_empty());

    assert!(view.toggle_pause());
    assert!(view.advance(1_000.0, &mut host));
    assert_eq!(host.redraws(), 1);
}

#[test]
fn test_reset_restores_defaults() {
    let (mut view, mut host) = attached();
    view.advance(10_000.0, &mut host);
    assert_ne!(view.settings().sun.inclination, 0.49);

    view.reset(&mut host);
    assert_eq!(view.settings(), &SkySettings::default());
    assert_eq!(
        host.uniforms.get(UniformName::Turbidity),
        UniformValue::Float(10.0)
    );
}

#[test]
fn test_apply_settings_becomes_new_default() {
    let (mut view, mut host) = attached();
    let reloaded = SkySettings {
        show_sun: true,
        sun_speed: 0.001,
        ..SkySettings::default()
    };
    view.apply_settings(reloaded, &mut host);
    assert!(host.marker.unwrap().1);
    assert!(view.driver().is_running());
    assert_eq!(view.driver().sun_speed(), 0.001);

    view.advance(100.0, &mut host);
    view.reset(&mut host);
    assert_eq!(view.settings(), &reloaded);
}

#[test]
fn test_detach_removes_meshes() {
    let (mut view, mut host) = attached();
    view.detach(&mut host);
    assert!(host.meshes.is_empty());
    assert_eq!(host.calls.last(), Some(&HostCall::RequestRedraw));
}

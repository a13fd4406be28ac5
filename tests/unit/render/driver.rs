use super::*;
use crate::render::surface::{PaintCall, RecordingSurface};

fn grid() -> Arc<DensityGrid> {
    Arc::new(DensityGrid::from_values(3, 1, 10.0, 10.0, vec![0.2, 1.0, 0.01]).unwrap())
}

fn linear(duration_ms: u64) -> AnimationSettings {
    AnimationSettings {
        enabled: true,
        duration: Duration::from_millis(duration_ms),
        ease: Ease::Linear,
    }
}

fn fill_opacities(calls: &[PaintCall]) -> Vec<f64> {
    calls
        .iter()
        .filter_map(|c| match c {
            PaintCall::Fill { opacity, .. } => Some(*opacity),
            _ => None,
        })
        .collect()
}

#[test]
fn without_animation_paints_once_at_full_progress() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), AnimationSettings::disabled());
    let mut s = RecordingSurface::new();
    let ticket = d.begin(grid(), Vec2::ZERO, Duration::ZERO, &mut s).unwrap();
    assert_eq!(ticket, None);
    assert_eq!(d.state(), DriverState::Idle);
    assert_eq!(s.frame_count(), 1);
    let opacities = fill_opacities(s.calls());
    assert_eq!(opacities.len(), 2);
    assert!((opacities[1] - 0.8).abs() < 1e-12);
}

#[test]
fn zero_duration_skips_the_state_machine() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), linear(0));
    let mut s = RecordingSurface::new();
    assert_eq!(d.begin(grid(), Vec2::ZERO, Duration::ZERO, &mut s).unwrap(), None);
    assert_eq!(d.state(), DriverState::Idle);
    assert_eq!(fill_opacities(s.calls()).len(), 2);
}

#[test]
fn animation_ramps_opacity_until_finished() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), linear(500));
    let mut s = RecordingSurface::new();
    let start = Duration::from_millis(1_000);

    let ticket = d.begin(grid(), Vec2::ZERO, start, &mut s).unwrap().unwrap();
    // progress 0: frame started but nothing visible yet
    assert_eq!(s.frame_count(), 1);
    assert!(s.last_frame_fills().is_empty());
    assert!(matches!(d.state(), DriverState::Animating { .. }));

    let status = d
        .frame(ticket, start + Duration::from_millis(250), &mut s)
        .unwrap();
    assert_eq!(status, FrameStatus::Continue(ticket));
    let mid = fill_opacities(&s.last_frame_fills());
    assert!((mid[1] - 0.4).abs() < 1e-12);

    let status = d
        .frame(ticket, start + Duration::from_millis(900), &mut s)
        .unwrap();
    assert_eq!(status, FrameStatus::Finished);
    assert_eq!(d.state(), DriverState::Idle);
    let last = fill_opacities(&s.last_frame_fills());
    assert!((last[1] - 0.8).abs() < 1e-12);

    assert_eq!(
        d.frame(ticket, start + Duration::from_millis(950), &mut s)
            .unwrap(),
        FrameStatus::Stale
    );
}

#[test]
fn superseded_cycles_never_paint() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), linear(500));
    let mut s = RecordingSurface::new();
    let old = d
        .begin(grid(), Vec2::ZERO, Duration::ZERO, &mut s)
        .unwrap()
        .unwrap();
    let new = d
        .begin(grid(), Vec2::ZERO, Duration::from_millis(100), &mut s)
        .unwrap()
        .unwrap();
    assert_ne!(old, new);
    assert!(new.generation() > old.generation());

    let before = s.calls().len();
    let status = d.frame(old, Duration::from_millis(300), &mut s).unwrap();
    assert_eq!(status, FrameStatus::Stale);
    assert_eq!(s.calls().len(), before);

    let status = d.frame(new, Duration::from_millis(300), &mut s).unwrap();
    assert!(matches!(status, FrameStatus::Continue(_)));
}

#[test]
fn clear_invalidates_outstanding_tickets() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), linear(500));
    let mut s = RecordingSurface::new();
    let t = d
        .begin(grid(), Vec2::ZERO, Duration::ZERO, &mut s)
        .unwrap()
        .unwrap();
    d.clear(&mut s).unwrap();
    assert!(d.grid().is_none());
    assert!(s.last_frame_fills().is_empty());
    assert_eq!(
        d.frame(t, Duration::from_millis(100), &mut s).unwrap(),
        FrameStatus::Stale
    );
}

#[test]
fn invalidate_stales_tickets_without_painting() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), linear(500));
    let mut s = RecordingSurface::new();
    let t = d
        .begin(grid(), Vec2::ZERO, Duration::ZERO, &mut s)
        .unwrap()
        .unwrap();
    let painted = s.calls().len();

    d.invalidate();
    assert_eq!(d.state(), DriverState::Idle);
    assert!(d.grid().is_none());
    assert!(d.generation() > t.generation());
    assert_eq!(
        d.frame(t, Duration::from_millis(100), &mut s).unwrap(),
        FrameStatus::Stale
    );
    assert_eq!(s.calls().len(), painted);
}

#[test]
fn degenerate_grid_draws_an_empty_frame_without_animating() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), linear(500));
    let mut s = RecordingSurface::new();
    let empty = Arc::new(DensityGrid::from_values(2, 2, 1.0, 1.0, vec![0.0; 4]).unwrap());
    assert_eq!(d.begin(empty, Vec2::ZERO, Duration::ZERO, &mut s).unwrap(), None);
    assert_eq!(d.state(), DriverState::Idle);
    assert_eq!(s.calls(), &[PaintCall::Begin, PaintCall::End]);
}

#[test]
fn repaint_redraws_at_full_opacity_without_a_new_cycle() {
    let mut d = RenderDriver::new(HeatmapStyle::default(), linear(500));
    let mut s = RecordingSurface::new();
    let ticket = d
        .begin(grid(), Vec2::new(5.0, 5.0), Duration::ZERO, &mut s)
        .unwrap()
        .unwrap();
    s.take_calls();

    d.repaint(&mut s).unwrap();
    let calls = s.take_calls();
    assert_eq!(calls.first(), Some(&PaintCall::Begin));
    assert_eq!(calls.last(), Some(&PaintCall::End));
    let opacities = fill_opacities(&calls);
    assert!((opacities[1] - 0.8).abs() < 1e-12);
    assert!(matches!(
        calls[2],
        PaintCall::Fill { rect, .. } if rect == crate::foundation::core::Rect::new(15.0, 5.0, 25.0, 15.0)
    ));

    assert_eq!(d.generation(), ticket.generation());
    assert_eq!(
        d.frame(ticket, Duration::from_millis(100), &mut s).unwrap(),
        FrameStatus::Continue(ticket)
    );
}

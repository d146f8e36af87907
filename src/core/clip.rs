use crate::core::PlotRect;

const JOIN_EPSILON: f64 = 1e-9;

/// Clips the segment `(x1, y1) -> (x2, y2)` to `rect` (Liang–Barsky).
///
/// Returns `None` when no part of the segment lies inside the rectangle.
#[must_use]
pub fn clip_segment(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    rect: PlotRect,
) -> Option<(f64, f64, f64, f64)> {
    if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
        return None;
    }

    let dx = x2 - x1;
    let dy = y2 - y1;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    for (p, q) in [
        (-dx, x1 - rect.left()),
        (dx, rect.right() - x1),
        (-dy, y1 - rect.top()),
        (dy, rect.bottom() - y1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }

    Some((
        x1 + t_enter * dx,
        y1 + t_enter * dy,
        x1 + t_exit * dx,
        y1 + t_exit * dy,
    ))
}

/// Clips a polyline to `rect`, splitting it into the contiguous runs that
/// stay visible. Runs with fewer than two points are dropped.
#[must_use]
pub fn clip_polyline(points: &[(f64, f64)], rect: PlotRect) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for pair in points.windows(2) {
        let (ax, ay) = pair[0];
        let (bx, by) = pair[1];
        match clip_segment(ax, ay, bx, by, rect) {
            Some((px, py, qx, qy)) => {
                let continues = current.last().is_some_and(|(lx, ly)| {
                    (lx - px).abs() <= JOIN_EPSILON && (ly - py).abs() <= JOIN_EPSILON
                });
                if !continues {
                    flush_run(&mut runs, &mut current);
                    current.push((px, py));
                }
                current.push((qx, qy));
            }
            None => flush_run(&mut runs, &mut current),
        }
    }
    flush_run(&mut runs, &mut current);
    runs
}

fn flush_run(runs: &mut Vec<Vec<(f64, f64)>>, current: &mut Vec<(f64, f64)>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{clip_polyline, clip_segment};
    use crate::core::PlotRect;

    const RECT: PlotRect = PlotRect::new(0.0, 0.0, 100.0, 50.0);

    #[test]
    fn inside_segment_is_unchanged() {
        assert_eq!(
            clip_segment(10.0, 10.0, 90.0, 40.0, RECT),
            Some((10.0, 10.0, 90.0, 40.0))
        );
    }

    #[test]
    fn outside_segment_is_dropped() {
        assert_eq!(clip_segment(-10.0, -10.0, -1.0, 60.0, RECT), None);
        assert_eq!(clip_segment(0.0, 60.0, 100.0, 70.0, RECT), None);
    }

    #[test]
    fn crossing_segment_is_trimmed_to_boundary() {
        let (x1, y1, x2, y2) = clip_segment(-50.0, 25.0, 50.0, 25.0, RECT).expect("visible");
        assert_eq!((x1, y1, x2, y2), (0.0, 25.0, 50.0, 25.0));
    }

    #[test]
    fn polyline_leaving_and_reentering_splits_into_runs() {
        let points = [(10.0, 10.0), (50.0, -40.0), (90.0, 10.0)];
        let runs = clip_polyline(&points, RECT);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0][0], (10.0, 10.0));
        assert_eq!(runs[1][1], (90.0, 10.0));
    }

    #[test]
    fn polyline_inside_stays_one_run() {
        let points = [(10.0, 10.0), (20.0, 20.0), (30.0, 10.0)];
        let runs = clip_polyline(&points, RECT);
        assert_eq!(runs, vec![points.to_vec()]);
    }
}

use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Selection – record ids picked on the chart
// ---------------------------------------------------------------------------

/// The set of selected record ids. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: BTreeSet<usize>,
}

impl Selection {
    pub fn set(&mut self, ids: impl IntoIterator<Item = usize>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn current(&self) -> &BTreeSet<usize> {
        &self.ids
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Chart series – what the scatter plot draws
// ---------------------------------------------------------------------------

/// Parallel coordinate / id arrays handed to the chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub record_id: Vec<usize>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.record_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_id.is_empty()
    }

    /// `(id, [x, y])` for every point.
    pub fn points(&self) -> impl Iterator<Item = (usize, [f64; 2])> + '_ {
        self.record_id
            .iter()
            .zip(self.x.iter().zip(&self.y))
            .map(|(&id, (&x, &y))| (id, [x, y]))
    }
}

// ---------------------------------------------------------------------------
// Region – a shape drawn on the chart
// ---------------------------------------------------------------------------

/// A region drawn in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Axis-aligned rectangle spanned by two opposite corners.
    Box { a: [f64; 2], b: [f64; 2] },
    /// Free-hand polygon; implicitly closed.
    Lasso(Vec<[f64; 2]>),
}

impl Region {
    pub fn contains(&self, p: [f64; 2]) -> bool {
        if !(p[0].is_finite() && p[1].is_finite()) {
            return false;
        }
        match self {
            Region::Box { a, b } => {
                let (x0, x1) = (a[0].min(b[0]), a[0].max(b[0]));
                let (y0, y1) = (a[1].min(b[1]), a[1].max(b[1]));
                x0 <= p[0] && p[0] <= x1 && y0 <= p[1] && p[1] <= y1
            }
            Region::Lasso(poly) => polygon_contains(poly, p),
        }
    }

    /// Ids of every series point inside the region, in series order.
    pub fn select(&self, series: &ChartSeries) -> Vec<usize> {
        series
            .points()
            .filter(|(_, p)| self.contains(*p))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Even-odd ray casting. Fewer than three vertices encloses nothing.
fn polygon_contains(poly: &[[f64; 2]], p: [f64; 2]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let [px, py] = p;
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let [xi, yi] = poly[i];
        let [xj, yj] = poly[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

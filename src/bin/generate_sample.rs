use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// A topic: cluster centre in the projection, mean sentiment, phrases.
struct Topic {
    centre: (f64, f64),
    sentiment: f64,
    phrases: &'static [&'static str],
}

static TOPICS: [Topic; 4] = [
    Topic {
        centre: (-3.0, 2.0),
        sentiment: 0.6,
        phrases: &[
            "Loving the new update, works great",
            "Best coffee in town & friendly staff",
            "What a beautiful sunset tonight",
        ],
    },
    Topic {
        centre: (3.0, 2.5),
        sentiment: -0.5,
        phrases: &[
            "Train delayed again, so frustrating",
            "Worst customer service ever",
            "Why is the app crashing <again>",
        ],
    },
    Topic {
        centre: (0.0, -3.0),
        sentiment: 0.0,
        phrases: &[
            "Meeting moved to 3pm",
            "Reading the quarterly report",
            "Weather forecast says rain tomorrow",
        ],
    },
    Topic {
        centre: (4.0, -2.0),
        sentiment: 0.3,
        phrases: &[
            "Game night with friends",
            "New episode drops on Friday",
            "Trying a new recipe this weekend",
        ],
    },
];

const MONTHS: [&str; 4] = ["2023-01", "2023-02", "2023-03", "2023-04"];

/// Wrap text in one of the artefacts the dashboard cleans up.
fn mangle(text: &str, rng: &mut SimpleRng) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    match rng.below(5) {
        0 => format!("['{escaped}']"),
        1 => format!("b'{escaped}\\nvia mobile'"),
        2 => format!("['{escaped}', 'extra', 'parts']"),
        3 => format!("  {escaped}   \t "),
        _ => escaped,
    }
}

struct Row {
    month: String,
    tweet: String,
    sentiment: Option<f64>,
    subjectivity: f64,
    dim1: f64,
    dim2: f64,
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::new();

    for month in MONTHS {
        for _ in 0..250 {
            let topic = &TOPICS[rng.below(TOPICS.len())];
            let phrase = topic.phrases[rng.below(topic.phrases.len())];
            // Roughly one row in fifty carries an unusable score.
            let sentiment = (rng.below(50) != 0)
                .then(|| rng.gauss(topic.sentiment, 0.25).clamp(-1.0, 1.0));
            rows.push(Row {
                month: month.to_string(),
                tweet: mangle(phrase, &mut rng),
                sentiment,
                subjectivity: rng.next_f64(),
                dim1: rng.gauss(topic.centre.0, 0.8),
                dim2: rng.gauss(topic.centre.1, 0.8),
            });
        }
    }

    // Write CSV
    let csv_path = "ProcessedTweets.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Month",
            "RawTweet",
            "Sentiment",
            "Subjectivity",
            "Dimension 1",
            "Dimension 2",
        ])
        .expect("Failed to write header");
    for row in &rows {
        writer
            .write_record([
                row.month.clone(),
                row.tweet.clone(),
                row.sentiment.map_or_else(|| "n/a".to_string(), |s| format!("{s:.4}")),
                format!("{:.4}", row.subjectivity),
                format!("{:.4}", row.dim1),
                format!("{:.4}", row.dim2),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("Month", DataType::Utf8, false),
        Field::new("RawTweet", DataType::Utf8, false),
        Field::new("Sentiment", DataType::Float64, true),
        Field::new("Subjectivity", DataType::Float64, false),
        Field::new("Dimension 1", DataType::Float64, false),
        Field::new("Dimension 2", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.month.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.tweet.as_str()))),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.sentiment).collect::<Vec<_>>())),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.subjectivity))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.dim1))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.dim2))),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "ProcessedTweets.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} tweets over {} months to {csv_path} and {parquet_path}",
        rows.len(),
        MONTHS.len()
    );
}

use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use serde_json::{Map, Number, Value};

const KEY_CHARS: &str = "abcdefgh";
const STRING_CHARS: &str = "abcxyz~/ 0123";

/// Shape limits for [`Fuzzer::random_tree`].
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Maximum nesting depth below the root.
    pub max_depth: usize,
    /// Maximum number of entries in a single object or array.
    pub max_width: usize,
    /// Probability that a non-root node is a container.
    pub container_odds: f64,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_width: 4,
            container_odds: 0.4,
        }
    }
}

/// A fuzzer for generating random JSON trees and edits to them.
///
/// Uses the xoshiro256** PRNG so that a failing seed can be replayed.
///
/// ```
/// use stringifyable_util::{Fuzzer, TreeOptions};
///
/// let mut a = Fuzzer::new(Some([7u8; 32]));
/// let mut b = Fuzzer::new(Some([7u8; 32]));
/// let opts = TreeOptions::default();
/// assert_eq!(a.random_tree(&opts), b.random_tree(&opts));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Generate a random string of the specified length from the given characters.
    pub fn random_string(&mut self, len: usize, chars: &str) -> String {
        let chars: Vec<char> = chars.chars().collect();
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())])
            .collect()
    }

    /// Generate a random leaf: null, boolean, integer, finite float or string.
    pub fn random_atomic(&mut self) -> Value {
        match self.rng.gen_range(0..5) {
            0 => Value::Null,
            1 => Value::Bool(self.rng.gen_bool(0.5)),
            2 => Value::from(self.rng.gen_range(-100i64..=100)),
            3 => {
                let f = (self.rng.gen::<f64>() * 1000.0).round() / 8.0;
                Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
            }
            _ => {
                let len = self.rng.gen_range(0..=6);
                Value::String(self.random_string(len, STRING_CHARS))
            }
        }
    }

    fn random_key(&mut self) -> String {
        let len = self.rng.gen_range(1..=2);
        self.random_string(len, KEY_CHARS)
    }

    /// Generate a random tree whose root is always an object.
    pub fn random_tree(&mut self, opts: &TreeOptions) -> Value {
        self.random_object(opts, opts.max_depth)
    }

    fn random_node(&mut self, opts: &TreeOptions, depth: usize) -> Value {
        if depth == 0 || !self.rng.gen_bool(opts.container_odds) {
            return self.random_atomic();
        }
        if self.rng.gen_bool(0.5) {
            self.random_object(opts, depth - 1)
        } else {
            self.random_array(opts, depth - 1)
        }
    }

    fn random_object(&mut self, opts: &TreeOptions, depth: usize) -> Value {
        let width = self.rng.gen_range(0..=opts.max_width);
        let mut map = Map::new();
        for _ in 0..width {
            let key = self.random_key();
            let value = self.random_node(opts, depth);
            map.insert(key, value);
        }
        Value::Object(map)
    }

    fn random_array(&mut self, opts: &TreeOptions, depth: usize) -> Value {
        let width = self.rng.gen_range(0..=opts.max_width);
        Value::Array((0..width).map(|_| self.random_node(opts, depth)).collect())
    }

    /// Return a copy of `tree` with `edits` random edits applied.
    ///
    /// Edits replace leaves, add and remove object members, grow and shrink
    /// arrays, and swap a container for a node of another shape.
    pub fn mutate(&mut self, tree: &Value, edits: usize, opts: &TreeOptions) -> Value {
        let mut out = tree.clone();
        for _ in 0..edits {
            self.mutate_once(&mut out, opts, opts.max_depth);
        }
        out
    }

    fn mutate_once(&mut self, node: &mut Value, opts: &TreeOptions, depth: usize) {
        let descend = self.rng.gen_bool(0.6);
        match node {
            Value::Object(map) => {
                if descend && !map.is_empty() {
                    let idx = self.rng.gen_range(0..map.len());
                    if let Some((_, child)) = map.iter_mut().nth(idx) {
                        self.mutate_once(child, opts, depth.saturating_sub(1));
                    }
                    return;
                }
                match self.rng.gen_range(0..3) {
                    0 if !map.is_empty() => {
                        let idx = self.rng.gen_range(0..map.len());
                        let key = map.keys().nth(idx).cloned();
                        if let Some(key) = key {
                            map.remove(&key);
                        }
                    }
                    1 => {
                        let key = self.random_key();
                        let value = self.random_node(opts, depth);
                        map.insert(key, value);
                    }
                    _ => *node = self.random_node(opts, depth),
                }
            }
            Value::Array(arr) => {
                if descend && !arr.is_empty() {
                    let idx = self.rng.gen_range(0..arr.len());
                    self.mutate_once(&mut arr[idx], opts, depth.saturating_sub(1));
                    return;
                }
                match self.rng.gen_range(0..4) {
                    0 if !arr.is_empty() => {
                        let idx = self.rng.gen_range(0..arr.len());
                        arr.remove(idx);
                    }
                    1 if !arr.is_empty() => {
                        let len = self.rng.gen_range(0..arr.len());
                        arr.truncate(len);
                    }
                    2 => {
                        let value = self.random_node(opts, depth);
                        arr.push(value);
                    }
                    _ => *node = self.random_node(opts, depth),
                }
            }
            _ => *node = self.random_node(opts, depth),
        }
    }
}

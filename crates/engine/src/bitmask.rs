use trellis_primitives::AttributeId;


const WORD_BITS: usize = u64::BITS as usize;

/// Growable set of attribute ids, reused across processor calls.
///
/// Capacity only grows; [`clear`](Self::clear) zeroes words in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmask {
	words: Vec<u64>,
}

impl Bitmask {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a bitmask with room for `words * 64` ids before growing.
	pub fn with_words(words: usize) -> Self {
		Self { words: vec![0; words] }
	}

	/// Sets the bit for `id`. Returns true if it was previously unset.
	///
	/// Grows to `max(word + 1, 2 * words)` when `id` is out of range.
	pub fn set_if_not_set(&mut self, id: AttributeId) -> bool {
		let (word, mask) = locate(id);
		if word >= self.words.len() {
			let len = (word + 1).max(self.words.len() * 2);
			self.words.resize(len, 0);
		}
		let slot = &mut self.words[word];
		if *slot & mask != 0 {
			return false;
		}
		*slot |= mask;
		true
	}

	pub fn contains(&self, id: AttributeId) -> bool {
		let (word, mask) = locate(id);
		self.words.get(word).is_some_and(|w| w & mask != 0)
	}

	/// Unsets every bit, keeping the allocated words.
	pub fn clear(&mut self) {
		self.words.fill(0);
	}

	/// Number of 64-bit words currently allocated.
	pub fn word_count(&self) -> usize {
		self.words.len()
	}

	/// Number of set bits.
	pub fn count(&self) -> usize {
		self.words.iter().map(|w| w.count_ones() as usize).sum()
	}
}

#[inline]
fn locate(id: AttributeId) -> (usize, u64) {
	let index = id.index();
	(index / WORD_BITS, 1u64 << (index % WORD_BITS))
}

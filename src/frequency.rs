use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;


/// How many times each distinct value occurs in some data.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {

    /// Index into `entries` for each value
    index: HashMap<T, usize>,
    /// Values with their counts, in order of first occurrence
    entries: Vec<(T, usize)>,

}

impl<T> FrequencyTable<T>
where
    T: Eq + Hash + Clone
{

    /// Tally the values in a single pass.
    pub fn count(data: impl IntoIterator<Item = T>) -> Self {

        let mut table = Self {
            index: HashMap::new(),
            entries: Vec::new(),
        };

        for value in data {
            table.add(value);
        }

        log::trace!("counted {} distinct values over {} occurrences", table.len(), table.total());

        table
    }


    fn add(&mut self, value: T) {

        match self.index.entry(value) {

            Entry::Occupied(entry) => {
                self.entries[*entry.get()].1 += 1;
            },

            Entry::Vacant(entry) => {
                self.entries.push((entry.key().clone(), 1));
                entry.insert(self.entries.len() - 1);
            },
        }
    }


    pub fn get(&self, value: &T) -> Option<usize> {
        self.index.get(value)
            .map(|&i| self.entries[i].1)
    }

}

impl<T> FrequencyTable<T> {

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }


    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }


    /// Total number of occurrences.
    pub fn total(&self) -> usize {
        self.entries.iter()
            .map(|(_, count)| count)
            .sum()
    }


    /// Iterate over `(value, count)` pairs in order of first occurrence.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.entries.iter()
            .map(|(value, count)| (value, *count))
    }

}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn counts_abracadabra() {

        let table = FrequencyTable::count("abracadabra".chars());

        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);

        assert_eq!(table.get(&'a'), Some(5));
        assert_eq!(table.get(&'b'), Some(2));
        assert_eq!(table.get(&'r'), Some(2));
        assert_eq!(table.get(&'c'), Some(1));
        assert_eq!(table.get(&'d'), Some(1));
        assert_eq!(table.get(&'z'), None);
    }


    #[test]
    fn keeps_first_occurrence_order() {

        let table = FrequencyTable::count("banana".chars());

        let order: Vec<(char, usize)> = table.iter()
            .map(|(&c, n)| (c, n))
            .collect();

        assert_eq!(order, [('b', 1), ('a', 3), ('n', 2)]);
    }


    #[test]
    fn empty_input() {

        let table = FrequencyTable::count(std::iter::empty::<u8>());

        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 0);
    }

}

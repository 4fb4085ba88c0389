// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Trait that typed arrays implement so that they can be iterated generically.
pub trait ArrayAccessor<'a> {
    /// The type of a (non-null) value of the array.
    type Item: 'a;

    /// The number of slots.
    fn len(&self) -> usize;

    /// Whether slot `i` is valid.
    fn is_valid(&self, i: usize) -> bool;

    /// The value of slot `i`, ignoring its validity.
    fn value(&'a self, i: usize) -> Self::Item;
}

/// Iterator over the values of an [`ArrayAccessor`], ignoring validity.
#[derive(Debug, Clone)]
pub struct ArrayValuesIter<'a, A: ArrayAccessor<'a>> {
    array: &'a A,
    index: usize,
    end: usize,
}

impl<'a, A: ArrayAccessor<'a>> ArrayValuesIter<'a, A> {
    /// Creates a new [`ArrayValuesIter`]
    #[inline]
    pub fn new(array: &'a A) -> Self {
        Self {
            array,
            index: 0,
            end: array.len(),
        }
    }
}

impl<'a, A: ArrayAccessor<'a>> Iterator for ArrayValuesIter<'a, A> {
    type Item = A::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            return None;
        }
        let old = self.index;
        self.index += 1;
        Some(self.array.value(old))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.end - self.index, Some(self.end - self.index))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let new_index = self.index.saturating_add(n);
        if new_index >= self.end {
            self.index = self.end;
            None
        } else {
            self.index = new_index;
            self.next()
        }
    }
}

impl<'a, A: ArrayAccessor<'a>> DoubleEndedIterator for ArrayValuesIter<'a, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        } else {
            self.end -= 1;
            Some(self.array.value(self.end))
        }
    }
}

impl<'a, A: ArrayAccessor<'a>> ExactSizeIterator for ArrayValuesIter<'a, A> {}

/// Iterator over the slots of an [`ArrayAccessor`], returning [`None`] for null slots.
#[derive(Debug, Clone)]
pub struct ArrayIter<'a, A: ArrayAccessor<'a>> {
    values: ArrayValuesIter<'a, A>,
}

impl<'a, A: ArrayAccessor<'a>> ArrayIter<'a, A> {
    /// Creates a new [`ArrayIter`]
    #[inline]
    pub fn new(array: &'a A) -> Self {
        Self {
            values: ArrayValuesIter::new(array),
        }
    }
}

impl<'a, A: ArrayAccessor<'a>> Iterator for ArrayIter<'a, A> {
    type Item = Option<A::Item>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.values.index;
        if index == self.values.end {
            return None;
        }
        self.values.index += 1;
        let array = self.values.array;
        Some(array.is_valid(index).then(|| array.value(index)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'a, A: ArrayAccessor<'a>> DoubleEndedIterator for ArrayIter<'a, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.values.index == self.values.end {
            return None;
        }
        self.values.end -= 1;
        let index = self.values.end;
        let array = self.values.array;
        Some(array.is_valid(index).then(|| array.value(index)))
    }
}

impl<'a, A: ArrayAccessor<'a>> ExactSizeIterator for ArrayIter<'a, A> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Squares(Vec<Option<u32>>);

    impl<'a> ArrayAccessor<'a> for Squares {
        type Item = u32;

        fn len(&self) -> usize {
            self.0.len()
        }

        fn is_valid(&self, i: usize) -> bool {
            self.0[i].is_some()
        }

        fn value(&'a self, i: usize) -> u32 {
            self.0[i].map(|x| x * x).unwrap_or_default()
        }
    }

    #[test]
    fn both_ends() {
        let array = Squares(vec![Some(1), None, Some(3)]);
        let mut iter = ArrayIter::new(&array);
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back(), Some(Some(9)));
        assert_eq!(iter.next(), Some(Some(1)));
        assert_eq!(iter.next(), Some(None));
        assert_eq!(iter.next(), None);

        let values = ArrayValuesIter::new(&array).rev().collect::<Vec<_>>();
        assert_eq!(values, vec![9, 0, 1]);
    }
}

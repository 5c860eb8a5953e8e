/// Defines an index new-type together with a `Vec` new-type that can only be
/// indexed by it.
///
/// The vector grows on demand through [`ensure_len`](#method.ensure_len), which
/// is how per-node tables follow the node count of a growing graph.
#[macro_export]
macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        /* ——————————————————— index new‑type ——————————————————— */

        $(#[$idx_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
        $idx_vis struct $Idx(pub usize);

        impl ::std::fmt::Display for $Idx {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        /* ——————————————————— vector new‑type ——————————————————— */

        $(#[$vec_meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        impl<T> $Vec<T> {
            #[inline] pub fn new() -> Self { Self(::std::vec::Vec::new()) }

            #[inline] pub fn len(&self) -> usize { self.0.len() }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

            #[inline] pub fn get(&self, idx: $Idx) -> Option<&T> { self.0.get(idx.0) }

            /// Grows the vector with `fill` until `len` entries exist. Never shrinks.
            pub fn ensure_len(&mut self, len: usize, fill: impl FnMut() -> T) {
                if self.0.len() < len {
                    self.0.resize_with(len, fill);
                }
            }

            #[inline] pub fn iter<'a>(&'a self) -> ::std::iter::Map<::std::iter::Enumerate<::std::slice::Iter<'a, T>>, fn((usize, &T)) -> ($Idx, &T)> {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }

            #[inline] pub fn clear(&mut self) { self.0.clear() }

            pub fn write_display<W: ::std::fmt::Write>(&self, writer: &mut W, formatter: impl Fn(&T) -> String) -> ::std::fmt::Result {
                writer.write_str("[")?;
                for (i, item) in self {
                    if i.0 != 0 {
                        write!(writer, ", ")?;
                    }
                    write!(writer, "{}", formatter(item))?;
                }
                writer.write_str("]")
            }
        }

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            #[inline] fn from_iter<I: ::std::iter::IntoIterator<Item = T>>(it: I) -> Self {
                Self(::std::vec::Vec::from_iter(it))
            }
        }

        impl<'a, T> ::std::iter::IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            >;
            fn into_iter(self) -> Self::IntoIter {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
        }
    };
}

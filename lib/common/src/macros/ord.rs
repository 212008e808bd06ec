/// Implement `PartialEq`, `Eq`, `PartialOrd`, `Ord` and `Hash` for `$Target` by comparing a key
/// derived from each value.
///
/// The key expression sees the value under the name `$this` and must produce something that is
/// itself `Ord + Hash`; all five impls go through it, so they always agree with eachother.
///
/// ```
/// use stripbake_common::{impl_ord_by_key, OrderedFloat};
///
/// #[derive(Debug, Clone, Copy)]
/// struct Weight(f32);
///
/// impl_ord_by_key!(Weight, w => OrderedFloat(w.0));
///
/// assert!(Weight(-1.0) < Weight(2.5));
/// assert_eq!(Weight(0.0), Weight(-0.0));
/// ```
#[macro_export]
macro_rules! impl_ord_by_key {
    ($Target:ty, $this:ident => $key:expr) => {
        impl ::std::cmp::PartialEq for $Target {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                let key = |$this: &$Target| $key;
                key(self) == key(other)
            }
        }

        impl ::std::cmp::Eq for $Target {}

        impl ::std::cmp::PartialOrd for $Target {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> ::std::option::Option<::std::cmp::Ordering> {
                ::std::option::Option::Some(::std::cmp::Ord::cmp(self, other))
            }
        }

        impl ::std::cmp::Ord for $Target {
            #[inline]
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                let key = |$this: &$Target| $key;
                key(self).cmp(&key(other))
            }
        }

        impl ::std::hash::Hash for $Target {
            #[inline]
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                let key = |$this: &$Target| $key;
                ::std::hash::Hash::hash(&key(self), state);
            }
        }
    };
}

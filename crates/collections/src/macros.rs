/// Builds a [`Slot`](crate::hashmap::Slot) for `name`, computing its raw key
#[macro_export]
macro_rules! slot {
    ( $name: expr, $value: expr) => {
        $crate::hashmap::Slot::new($name, $value.into())
    };
}

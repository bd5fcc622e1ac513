use ::quickcheck::{Arbitrary, Gen};
use super::order::{Equal, Order};
use super::Tree;

impl<T, O, E> Arbitrary for Tree<T, O, E>
    where T: Arbitrary, O: 'static + Clone + Order<T> + Default, E: 'static + Clone + Equal<T> + Default {

    fn arbitrary(g: &mut Gen) -> Self {
        let mut tree: Self = Vec::<T>::arbitrary(g).into_iter().collect();
        tree.extend(Vec::<T>::arbitrary(g));
        tree
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<T> = self.iter().cloned().collect();
        Box::new(vec.shrink().map(|vec| vec.into_iter().collect()))
    }
}

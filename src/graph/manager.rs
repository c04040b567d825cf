use crate::io::{ParseError, Tokenizer};
use std::io;

/// The collaborator-supplied side of node and link payloads.
///
/// A graph holds one manager for node payloads and one for link payloads
/// and calls them exclusively through these four operations; it never
/// inspects payload contents. `write` and `read` move the payload through
/// the whitespace-token text format; a manager for payload-free graphs may
/// emit and consume nothing (see [UnitManager]).
pub trait PayloadManager {
    type Payload;

    fn allocate(&mut self) -> Self::Payload;
    fn release(&mut self, payload: Self::Payload);
    fn write(&self, out: &mut dyn io::Write, payload: &Self::Payload) -> io::Result<()>;
    fn read(&mut self, input: &mut Tokenizer<'_>) -> Result<Self::Payload, ParseError>;
}

/// Manager for graphs that carry no payload at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitManager;

impl PayloadManager for UnitManager {
    type Payload = ();

    fn allocate(&mut self) -> Self::Payload {}

    fn release(&mut self, _payload: Self::Payload) {}

    fn write(&self, _out: &mut dyn io::Write, _payload: &Self::Payload) -> io::Result<()> {
        Ok(())
    }

    fn read(&mut self, _input: &mut Tokenizer<'_>) -> Result<Self::Payload, ParseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    /// Tracks allocate/release balance so tests can catch leaked payloads.
    #[derive(Debug, Default)]
    pub struct CountingManager {
        pub allocated: usize,
        pub released: usize,
    }

    impl CountingManager {
        pub fn live(&self) -> usize {
            self.allocated - self.released
        }
    }

    impl PayloadManager for CountingManager {
        type Payload = ();

        fn allocate(&mut self) -> Self::Payload {
            self.allocated += 1;
        }

        fn release(&mut self, _payload: Self::Payload) {
            self.released += 1;
        }

        fn write(&self, _out: &mut dyn io::Write, _payload: &Self::Payload) -> io::Result<()> {
            Ok(())
        }

        fn read(&mut self, _input: &mut Tokenizer<'_>) -> Result<Self::Payload, ParseError> {
            Ok(())
        }
    }

    #[test]
    fn remove_node_releases_its_links() {
        let mut g = Graph::new(CountingManager::default(), CountingManager::default());
        let a = g.insert();
        let b = g.insert();
        let c = g.insert();
        g.link(a, b, 1.0);
        g.link(b, c, 1.0);
        g.linkto(b, b, 0.5);
        assert_eq!(g.node_manager().live(), 3);
        assert_eq!(g.link_manager().live(), 5);

        g.remove_node(b);
        assert_eq!(g.node_manager().live(), 2);
        // b owned b->a, b->c and b->b; a->b and c->b are left dangling
        assert_eq!(g.link_manager().live(), 2);

        g.clear();
        assert_eq!(g.node_manager().live(), 0);
        assert_eq!(g.link_manager().live(), 0);
    }

    #[test]
    fn remove_link_releases_both_directions() {
        let mut g = Graph::new(CountingManager::default(), CountingManager::default());
        let a = g.insert();
        let b = g.insert();
        g.link(a, b, 1.0);
        assert_eq!(g.remove_link(a, b), 2);
        assert_eq!(g.link_manager().live(), 0);

        g.linkto(a, b, 1.0);
        assert_eq!(g.remove_link(a, b), 1);
        assert_eq!(g.remove_link(a, b), 0);
        assert_eq!(g.link_manager().live(), 0);
    }

    #[test]
    fn drop_releases_through_managers() {
        use std::cell::Cell;
        use std::rc::Rc;

        /// Counters shared with the test so they outlive the graph.
        #[derive(Debug, Default, Clone)]
        struct SharedCountManager {
            allocated: Rc<Cell<usize>>,
            released: Rc<Cell<usize>>,
        }

        impl PayloadManager for SharedCountManager {
            type Payload = ();

            fn allocate(&mut self) -> Self::Payload {
                self.allocated.set(self.allocated.get() + 1);
            }

            fn release(&mut self, _payload: Self::Payload) {
                self.released.set(self.released.get() + 1);
            }

            fn write(
                &self,
                _out: &mut dyn io::Write,
                _payload: &Self::Payload,
            ) -> io::Result<()> {
                Ok(())
            }

            fn read(&mut self, _input: &mut Tokenizer<'_>) -> Result<Self::Payload, ParseError> {
                Ok(())
            }
        }

        let nman = SharedCountManager::default();
        let lman = SharedCountManager::default();
        {
            let mut g = Graph::new(nman.clone(), lman.clone());
            let a = g.insert();
            let b = g.insert();
            g.link(a, b, 1.0);
            assert_eq!(nman.allocated.get(), 2);
            assert_eq!(lman.allocated.get(), 2);
            assert_eq!(nman.released.get(), 0);
        }
        assert_eq!(nman.released.get(), nman.allocated.get());
        assert_eq!(lman.released.get(), lman.allocated.get());
    }

    #[test]
    fn extract_keeps_payloads_alive() {
        let mut g = Graph::new(CountingManager::default(), CountingManager::default());
        let a = g.insert();
        let b = g.insert();
        g.linkto(a, b, 1.0);

        let node = g.extract(a);
        assert_eq!(g.num_nodes(), 1);
        assert_eq!(g.node_manager().live(), 2);
        assert_eq!(g.link_manager().live(), 1);

        let a2 = g.insert_node(node);
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.node(a2).num_links(), 1);
    }
}

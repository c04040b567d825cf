use crate::graph::*;
use crate::io::{ParseError, Tokenizer};
use std::io::{self, Write};

fn write_cost(out: &mut dyn io::Write, cost: f32) -> io::Result<()> {
    // integral values beyond i64 would saturate in the cast
    if cost == cost.trunc() && (cost as i64) as f32 == cost {
        write!(out, "{}", cost as i64)
    } else {
        write!(out, "{}", cost)
    }
}

fn parse_blocked(tok: &str) -> Result<bool, ParseError> {
    match tok.as_bytes().first() {
        Some(b'b') | Some(b'B') => Ok(true),
        Some(b'f') | Some(b'F') => Ok(false),
        _ => match tok.parse::<i64>() {
            Ok(v) => Ok(v != 0),
            Err(_) => Err(ParseError::BadBlockedFlag(tok.to_string())),
        },
    }
}

impl<NM, LM> Graph<NM, LM>
where
    NM: PayloadManager,
    LM: PayloadManager,
{
    /// Keeps the indexing session of the next [write](Self::write) open so
    /// the caller can reuse the assigned dense indices. One-shot: the flag
    /// resets after that write, and the caller owns the matching
    /// `end_indexing`.
    pub fn leave_indices_after_save(&mut self, leave: bool) {
        self.leave_indices_after_save = leave;
    }

    /// Serializes the graph, assigning dense indices to nodes in container
    /// order through an indexing session. Fails the session check if any
    /// visitation session is already active.
    pub fn write(&mut self, out: &mut dyn io::Write) -> io::Result<()> {
        self.begin_indexing();
        let ids: Vec<NodeId> = self.nodes().collect();
        for (i, &n) in ids.iter().enumerate() {
            self.set_index(n, i as u64);
        }

        write!(out, "[")?;
        for (pos, &n) in ids.iter().enumerate() {
            write!(out, "{} {} ", self.index(n), self.node(n).blocked() as u8)?;
            self.nman.write(out, self.node(n).payload())?;
            let nlinks = self.node(n).num_links();
            if nlinks > 0 {
                write!(out, " (")?;
                for li in 0..nlinks {
                    let (blocked, target, cost) = {
                        let l = self.node(n).link(li);
                        (l.blocked(), l.target(), l.cost())
                    };
                    write!(out, "{} {} ", blocked as u8, self.index(target))?;
                    write_cost(out, cost)?;
                    write!(out, " ")?;
                    self.lman.write(out, self.node(n).link(li).payload())?;
                    if li + 1 < nlinks {
                        write!(out, " ")?;
                    }
                }
                write!(out, ")")?;
            }
            if pos + 1 < ids.len() {
                writeln!(out)?;
            }
        }
        write!(out, "]")?;

        if !self.leave_indices_after_save {
            self.end_indexing();
        }
        self.leave_indices_after_save = false;
        Ok(())
    }

    /// Clears the graph and rebuilds it from its text form. Nodes are
    /// allocated in file order so their position doubles as their index;
    /// link targets are resolved in a second pass once all nodes exist. On
    /// error the graph may be partially populated.
    pub fn read(&mut self, input: &mut dyn io::BufRead) -> Result<(), ParseError> {
        self.clear();
        let mut tk = Tokenizer::new(input);
        tk.expect("[")?;

        let mut order: Vec<NodeId> = Vec::new();
        let mut tok = tk.require()?;
        while tok != "]" {
            // tok holds the stored node index; position is identity
            let blocked = parse_blocked(&tk.require()?)?;
            let payload = self.nman.read(&mut tk)?;
            let mut node = Node::new(payload);
            node.set_blocked(blocked);
            let n = self.insert_node(node);
            order.push(n);

            tok = tk.require()?;
            if tok == "(" {
                loop {
                    let t = tk.require()?;
                    if t == ")" {
                        tok = tk.require()?;
                        break;
                    }
                    let lblocked = parse_blocked(&t)?;
                    let ttok = tk.require()?;
                    let target: u64 = ttok
                        .parse()
                        .map_err(|_| ParseError::BadNumber(ttok.clone()))?;
                    let ctok = tk.require()?;
                    let cost: f32 = ctok
                        .parse()
                        .map_err(|_| ParseError::BadNumber(ctok.clone()))?;
                    let payload = self.lman.read(&mut tk)?;
                    // park the target index in the tag word until pass two
                    self.node_mut(n).links.push(Link {
                        target: NodeId(0),
                        cost,
                        blocked: lblocked,
                        tag: target,
                        payload,
                    });
                }
            }
        }

        for &n in &order {
            for li in 0..self.node(n).num_links() {
                let stored = self.node(n).link(li).tag;
                let target = *order
                    .get(stored as usize)
                    .ok_or(ParseError::TargetOutOfRange(stored))?;
                let link = self.node_mut(n).link_mut(li);
                link.target = target;
                link.tag = 0;
            }
        }
        Ok(())
    }
}

use std::{fmt::Formatter, ops::Index};

use lazy_static::lazy_static;

use crate::syntax::lex::{
    Operator,
    Operator::{Derivative, Divide, Exponent, Ln, Minus, Multiply, Plus, When},
};

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Fixity {
    Left,
    Right,
    Prefix,
    Suffix,
}

/// How an entry of the chain relates to the entry listed before it.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Relation {
    StrictlyHigher,
    SameLevel,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Asso {
    pub op: Operator,
    pub fixity: Fixity,
    pub relation: Relation,
}

impl Asso {
    const fn new(op: Operator, fixity: Fixity) -> Asso {
        Asso {
            op,
            fixity,
            relation: Relation::StrictlyHigher,
        }
    }

    pub const fn left(op: Operator) -> Asso {
        Asso::new(op, Fixity::Left)
    }

    pub const fn right(op: Operator) -> Asso {
        Asso::new(op, Fixity::Right)
    }

    pub const fn pre(op: Operator) -> Asso {
        Asso::new(op, Fixity::Prefix)
    }

    pub const fn suf(op: Operator) -> Asso {
        Asso::new(op, Fixity::Suffix)
    }

    pub const fn same_level(self) -> Asso {
        Asso {
            relation: Relation::SameLevel,
            ..self
        }
    }
}

/// Operator precedence, loosest first.
pub const OPERATOR_CHAIN: &[Asso] = &[
    Asso::left(When),
    Asso::left(Plus),
    Asso::left(Minus).same_level(),
    Asso::left(Multiply),
    Asso::left(Divide).same_level(),
    Asso::pre(Ln),
    Asso::right(Exponent),
    Asso::suf(Derivative),
    Asso::pre(Plus),
    Asso::pre(Minus).same_level(),
];

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Infix {
    pub left: u32,
    pub right: u32,
}

/// Binding powers of one operator; `None` means the operator cannot
/// appear in that position.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub struct BindPower {
    pub prefix: Option<u32>,
    pub infix: Option<Infix>,
    pub suffix: Option<u32>,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct BindPowerTable {
    entries: [BindPower; Operator::COUNT],
}

impl BindPowerTable {
    /// Walks the chain from the loosest entry, handing out increasing powers.
    /// A same-level entry draws from the counter value its run started at.
    pub fn build(chain: &[Asso]) -> BindPowerTable {
        let mut entries = [BindPower::default(); Operator::COUNT];
        let mut counter = 0;
        let mut run_start = 0;

        for asso in chain {
            let entry = &mut entries[asso.op as usize];
            match asso.relation {
                Relation::StrictlyHigher => {
                    run_start = counter;
                    assign(entry, asso.fixity, &mut counter);
                }
                Relation::SameLevel => {
                    let mut shared = run_start;
                    assign(entry, asso.fixity, &mut shared);
                }
            }
        }

        BindPowerTable { entries }
    }
}

fn assign(entry: &mut BindPower, fixity: Fixity, counter: &mut u32) {
    let mut next = || {
        *counter += 1;
        *counter
    };

    match fixity {
        Fixity::Left => {
            let left = next();
            let right = next();
            entry.infix = Some(Infix { left, right });
        }
        Fixity::Right => {
            let right = next();
            let left = next();
            entry.infix = Some(Infix { left, right });
        }
        Fixity::Prefix => entry.prefix = Some(next()),
        Fixity::Suffix => entry.suffix = Some(next()),
    }
}

impl Index<Operator> for BindPowerTable {
    type Output = BindPower;

    fn index(&self, op: Operator) -> &BindPower {
        &self.entries[op as usize]
    }
}

impl std::fmt::Display for BindPowerTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let show = |bp: Option<u32>| bp.map_or("-".to_owned(), |bp| bp.to_string());

        writeln!(f, "op: pbp lbp rbp sbp")?;
        for op in Operator::ALL.iter() {
            let bp = &self[*op];
            writeln!(
                f,
                "{:>2}: {:>3} {:>3} {:>3} {:>3}",
                op.as_str(),
                show(bp.prefix),
                show(bp.infix.map(|i| i.left)),
                show(bp.infix.map(|i| i.right)),
                show(bp.suffix),
            )?;
        }
        Ok(())
    }
}

lazy_static! {
    pub static ref BIND_POWER: BindPowerTable = BindPowerTable::build(OPERATOR_CHAIN);
}

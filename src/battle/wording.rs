//! Question text: plain equations and short word problems

use rand::Rng;

use super::operation::Operation;

/// Plain equation form, e.g. `"12 + 7 = ?"`
pub fn equation(a: u32, b: u32, op: Operation) -> String {
    format!("{} {} {} = ?", a, op.symbol(), b)
}

/// Word-problem phrasing, one line per sentence.
///
/// Three narrative variants per operation; `a` and `b` are substituted in
/// the same order as the equation so the answer is unchanged.
pub fn word_problem<R: Rng + ?Sized>(a: u32, b: u32, op: Operation, rng: &mut R) -> String {
    let variant = rng.random_range(0..3);
    match (op, variant) {
        (Operation::Add, 0) => format!(
            "Your satchel holds {a} moonstones.\nA goblin drops {b} more.\nHow many moonstones now?"
        ),
        (Operation::Add, 1) => format!(
            "{a} fireflies light the path.\n{b} more flutter in.\nHow many fireflies glow?"
        ),
        (Operation::Add, _) => format!(
            "You brewed {a} potions at dawn\nand {b} potions at dusk.\nHow many potions in all?"
        ),
        (Operation::Subtract, 0) => format!(
            "You carry {a} mana crystals.\nA spell burns {b} of them.\nHow many are left?"
        ),
        (Operation::Subtract, 1) => format!(
            "{a} bats guard the cave.\nYour light scares off {b}.\nHow many bats remain?"
        ),
        (Operation::Subtract, _) => format!(
            "The chest has {a} gold coins.\nYou pay the ferryman {b}.\nHow many coins are left?"
        ),
        (Operation::Multiply, 0) => format!(
            "Each spellbook has {a} runes.\nYou find {b} spellbooks.\nHow many runes in total?"
        ),
        (Operation::Multiply, 1) => format!(
            "A fireball deals {a} damage.\nYou cast it {b} times.\nHow much damage in total?"
        ),
        (Operation::Multiply, _) => format!(
            "{a} mushrooms in each ring,\n{b} rings in the glade.\nHow many mushrooms?"
        ),
        (Operation::Divide, 0) => format!(
            "{a} acorns are shared evenly\namong {b} forest sprites.\nHow many does each get?"
        ),
        (Operation::Divide, 1) => format!(
            "{a} slimes split into\n{b} equal puddles.\nHow many slimes per puddle?"
        ),
        (Operation::Divide, _) => format!(
            "{a} mana points fuel\n{b} equal spells.\nHow much mana per spell?"
        ),
    }
}

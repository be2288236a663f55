//! Uncalled-mutation classification
//!
//! A mutation is uncalled when it came from a fillout pass, or when no read
//! supports the alternate allele. Uncalled mutations go to
//! `data_mutations_uncalled.txt` instead of the main mutations file.

use crate::mutation::Mutation;

/// Check whether a mutation belongs in the uncalled file
pub fn is_uncalled(mutation: &Mutation) -> bool {
    // Fillout rows are uncalled regardless of depth
    if mutation.is_fillout {
        return true;
    }

    mutation.t_alt_count < 1
}

/// Classify a mutation, marking it uncalled when it is
///
/// Called mutations are left exactly as they are.
pub fn classify_and_update(mutation: &mut Mutation) -> bool {
    let uncalled = is_uncalled(mutation);
    if uncalled {
        mutation.set_uncalled();
    }
    uncalled
}

pub mod draughts;

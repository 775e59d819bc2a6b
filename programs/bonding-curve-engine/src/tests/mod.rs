mod constants_assertion;
mod test_migration;
mod test_swap;

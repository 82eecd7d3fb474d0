#[cfg(test)]
mod common;


#[cfg(test)]
mod group_test;

#[cfg(test)]
mod subgroup_test;

#[cfg(test)]
mod model_test;

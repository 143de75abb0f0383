// Copyright (c) 2022 MASSA LABS <info@massa.net>

mod mock;
mod scenarios_hburn;
mod scenarios_hmove;
mod universe;

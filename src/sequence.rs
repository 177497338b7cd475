//! The image list that directives operate on.
//!
//! Like imagemagick, operators apply to every image in the current list.
//! An opening parenthesis starts a fresh, empty list; the closing one moves
//! whatever that list ended up with to the end of the enclosing list.

use crate::{
    arg_parsers::Gravity, error::MagickError, image::Image, operations::Directive, wm_err,
};

#[derive(Debug)]
pub struct ImageSequence {
    /// One list per parenthesis level; the last one is the current list.
    lists: Vec<Vec<Image>>,
    /// The `-gravity` setting in effect.
    pub gravity: Gravity,
}

impl ImageSequence {
    pub fn new(images: Vec<Image>) -> Self {
        Self {
            lists: vec![images],
            gravity: Gravity::default(),
        }
    }

    pub fn depth(&self) -> usize {
        self.lists.len() - 1
    }

    pub fn current(&self) -> &[Image] {
        self.lists.last().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn current_mut(&mut self) -> &mut Vec<Image> {
        if self.lists.is_empty() {
            self.lists.push(Vec::new());
        }
        let last = self.lists.len() - 1;
        &mut self.lists[last]
    }

    /// The current list, or an error naming `operator` if there is nothing to operate on.
    pub fn images_mut(&mut self, operator: &str) -> Result<&mut Vec<Image>, MagickError> {
        let images = self.current_mut();
        if images.is_empty() {
            return Err(wm_err!("no images defined `{operator}'"));
        }
        Ok(images)
    }

    /// The list that `-clone` copies from: the enclosing one inside parentheses.
    pub fn clone_source(&self) -> &[Image] {
        match self.lists.len() {
            0 => &[],
            1 => &self.lists[0],
            n => &self.lists[n - 2],
        }
    }

    pub fn open_group(&mut self) {
        self.lists.push(Vec::new());
    }

    pub fn close_group(&mut self) -> Result<(), MagickError> {
        if self.depth() == 0 {
            return Err(wm_err!("unbalanced parenthesis: `)' without matching `('"));
        }
        let finished = self.lists.pop().unwrap_or_default();
        self.current_mut().extend(finished);
        Ok(())
    }

    pub fn push(&mut self, image: Image) {
        self.current_mut().push(image);
    }

    pub fn run(&mut self, directives: &[Directive]) -> Result<(), MagickError> {
        for directive in directives {
            directive.execute(self)?;
        }
        Ok(())
    }

    /// Consumes the sequence, returning the images of the top-level list.
    pub fn finish(self) -> Result<Vec<Image>, MagickError> {
        if self.depth() != 0 {
            return Err(wm_err!(
                "unbalanced parenthesis: {} `(' left open",
                self.depth()
            ));
        }
        Ok(self.lists.into_iter().next().unwrap_or_default())
    }
}

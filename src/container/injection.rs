use crate::{Container, InjectResult, ServiceInfo, Svc};
use std::{cell::RefCell, fmt, rc::Rc};
use tracing::trace;

/// A post-construction action run on an instance of `T`. It receives the
/// instance and the container that resolved it, and may resolve further
/// services from that container.
pub type InjectionDelegate<T> =
    Rc<dyn Fn(&Svc<T>, &Container) -> InjectResult<()>>;

/// A pending injection: one action bound to the instance it applies to.
pub struct InjectionCommand {
    service_info: ServiceInfo,
    inject: Box<dyn FnOnce(&Container) -> InjectResult<()>>,
}

impl InjectionCommand {
    /// Creates a command injecting into an instance of the given service.
    pub fn new<F>(service_info: ServiceInfo, inject: F) -> Self
    where
        F: 'static + FnOnce(&Container) -> InjectResult<()>,
    {
        InjectionCommand {
            service_info,
            inject: Box::new(inject),
        }
    }

    #[must_use]
    pub fn service_info(&self) -> ServiceInfo {
        self.service_info
    }

    /// Runs the injection.
    pub fn inject(self, container: &Container) -> InjectResult<()> {
        (self.inject)(container)
    }
}

impl fmt::Debug for InjectionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionCommand")
            .field("service_info", &self.service_info)
            .finish()
    }
}

/// The work list of injections collected during a resolution. It is only
/// non-empty while a resolution is in progress.
#[derive(Default, Debug)]
pub struct InjectionQueue {
    commands: RefCell<Vec<InjectionCommand>>,
}

impl InjectionQueue {
    pub fn push(&self, command: InjectionCommand) {
        self.commands.borrow_mut().push(command);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    /// Runs queued commands, most recently queued first, until the queue is
    /// empty. Commands queued by a running command are drained by the same
    /// loop.
    pub(crate) fn drain(&self, container: &Container) -> InjectResult<()> {
        loop {
            // The borrow must end before the command runs since commands can
            // queue more commands.
            let command = self.commands.borrow_mut().pop();
            let command = match command {
                Some(command) => command,
                None => return Ok(()),
            };

            trace!(
                service = command.service_info().name(),
                remaining = self.len(),
                "running injection"
            );
            command.inject(container)?;
        }
    }

    pub(crate) fn clear(&self) {
        self.commands.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_runs_most_recent_first() {
        let container = Container::builder().build();
        let queue = InjectionQueue::default();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in &["first", "second", "third"] {
            let order = order.clone();
            let name = *name;
            queue.push(InjectionCommand::new(
                ServiceInfo::of::<i32>(),
                move |_| {
                    order.borrow_mut().push(name);
                    Ok(())
                },
            ));
        }

        queue.drain(&container).unwrap();
        assert!(queue.is_empty());
        assert_eq!(vec!["third", "second", "first"], *order.borrow());
    }

    #[test]
    fn commands_queued_while_draining_are_drained() {
        let container = Container::builder().build();
        let queue = Rc::new(InjectionQueue::default());
        let order = Rc::new(RefCell::new(Vec::new()));

        {
            let inner_queue = queue.clone();
            let order = order.clone();
            queue.push(InjectionCommand::new(
                ServiceInfo::of::<i32>(),
                move |_| {
                    order.borrow_mut().push("outer");
                    let order = order.clone();
                    inner_queue.push(InjectionCommand::new(
                        ServiceInfo::of::<u8>(),
                        move |_| {
                            order.borrow_mut().push("queued by outer");
                            Ok(())
                        },
                    ));
                    Ok(())
                },
            ));
        }

        queue.drain(&container).unwrap();
        assert!(queue.is_empty());
        assert_eq!(vec!["outer", "queued by outer"], *order.borrow());
    }
}

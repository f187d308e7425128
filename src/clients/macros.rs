/// Generates typed accessors over a `ResourceClient`, converting framework
/// errors into the client's own error type.
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $id:ty, $patch:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: $id) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(|e| <$error>::ActorCommunicationError(e.to_string()))
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<update_ $entity_name_snake>](&self, id: $id, patch: $patch) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, patch).await.map_err(|e| <$error>::ActorCommunicationError(e.to_string()))
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $id:ty, $patch:ty, $error:ty, $entity_name_snake:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $id, $patch, $error, $entity_name_snake);
    };
}

/// Generates a client method that sends one request variant over an mpsc
/// channel and awaits the oneshot reply.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

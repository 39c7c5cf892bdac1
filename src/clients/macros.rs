#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](&self) -> Result<Vec<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.list().await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::rest_framework::Resource>::Id,
                ) -> Result<$entity, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::rest_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }

            pub fn from_gateway(gateway: $crate::gateway::ApiGateway) -> Self {
                Self::new($crate::rest_framework::ResourceClient::new(gateway))
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $entity_name_snake:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, $entity, $entity_name_snake);
    };
}
